//! Record shapes: typed rows with a static field table.
//!
//! A shape is a plain struct plus an ordered list of [`FieldDef`]s mapping each
//! column name to a setter. The binder resolves header columns against this
//! list instead of inspecting the struct at runtime. Shapes are normally
//! declared with [`table_row!`](crate::table_row), which also registers them
//! for discovery.

use crate::column::ColumnType;
use crate::convert::ConvertError;

/// Binds one raw cell into a row field.
///
/// The field is always written (with its default on failure); the error is
/// returned so the caller can report it.
pub type AssignFn<R> = fn(&mut R, &str) -> Result<(), ConvertError>;

/// One bindable field of a record shape.
pub struct FieldDef<R> {
    /// Column name, identical to the field name.
    pub name: &'static str,
    pub column_type: ColumnType,
    pub assign: AssignFn<R>,
}

/// A record type that can be populated from a table row.
pub trait TableRow: Default + Send + Sync + 'static {
    /// Type name of the shape; the registry derives the source name from it.
    const SHAPE_NAME: &'static str;

    /// Key column declared by the shape itself, if it differs from the default.
    const KEY_COLUMN: Option<&'static str> = None;

    /// Bindable fields in declaration order.
    const FIELDS: &'static [FieldDef<Self>];

    /// Looks up a field by column name.
    fn field(name: &str) -> Option<&'static FieldDef<Self>> {
        Self::FIELDS.iter().find(|field| field.name == name)
    }
}

/// Declares a record shape and registers it for discovery.
///
/// The struct gets `Debug`, `Clone`, `Default`, and `PartialEq` derives, a
/// [`TableRow`] impl whose field table follows declaration order, and an
/// `inventory` registration picked up by
/// [`ShapeCatalog::discover`](crate::ShapeCatalog::discover).
///
/// ```ignore
/// game_tables::table_row! {
///     /// One line of scripted dialogue.
///     pub struct DialogueData keyed_by "dialogue_id" {
///         pub dialogue_id: String,
///         pub speaker: String,
///         pub text: String,
///     }
/// }
/// ```
///
/// Field types must implement [`CellValue`](crate::CellValue).
#[macro_export]
macro_rules! table_row {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(keyed_by $key:literal)? {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::TableRow for $name {
            const SHAPE_NAME: &'static str = stringify!($name);
            const KEY_COLUMN: ::core::option::Option<&'static str> =
                $crate::__table_row_key!($($key)?);
            const FIELDS: &'static [$crate::FieldDef<Self>] = &[
                $(
                    $crate::FieldDef {
                        name: stringify!($field),
                        column_type: <$ty as $crate::CellValue>::COLUMN_TYPE,
                        assign: |row: &mut Self, raw: &str| {
                            let (value, result) = $crate::convert::<$ty>(raw).split();
                            row.$field = value;
                            result
                        },
                    },
                )*
            ];
        }

        $crate::inventory::submit! {
            $crate::ShapeDescriptor::of::<$name>()
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __table_row_key {
    () => {
        ::core::option::Option::None
    };
    ($key:literal) => {
        ::core::option::Option::Some($key)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ColumnType, TableRow};

    crate::table_row! {
        /// Shape used only by these tests.
        pub struct SkillData keyed_by "skill_id" {
            pub skill_id: i32,
            /// Display name.
            pub name: String,
            pub cooldown: f32,
            pub passive: bool,
            pub upgrade: Option<i32>,
        }
    }

    crate::table_row! {
        struct PlainData {
            id: i64,
        }
    }

    #[test]
    fn field_table_follows_declaration_order() {
        let names: Vec<_> = SkillData::FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names, ["skill_id", "name", "cooldown", "passive", "upgrade"]);
        assert_eq!(SkillData::field("cooldown").unwrap().column_type, ColumnType::Float);
        assert_eq!(SkillData::field("upgrade").unwrap().column_type, ColumnType::Int);
        assert!(SkillData::field("missing").is_none());
    }

    #[test]
    fn shape_metadata() {
        assert_eq!(SkillData::SHAPE_NAME, "SkillData");
        assert_eq!(SkillData::KEY_COLUMN, Some("skill_id"));
        assert_eq!(PlainData::KEY_COLUMN, None);
        assert_eq!(PlainData::default().id, 0);
    }

    #[test]
    fn assign_writes_default_on_failure() {
        let mut row = SkillData {
            cooldown: 3.0,
            ..SkillData::default()
        };

        let cooldown = SkillData::field("cooldown").unwrap();
        assert!((cooldown.assign)(&mut row, "fast").is_err());
        assert_eq!(row.cooldown, 0.0);

        let passive = SkillData::field("passive").unwrap();
        assert!((passive.assign)(&mut row, "1").is_ok());
        assert!(row.passive);

        let upgrade = SkillData::field("upgrade").unwrap();
        assert!((upgrade.assign)(&mut row, "").is_ok());
        assert_eq!(row.upgrade, None);
    }
}
