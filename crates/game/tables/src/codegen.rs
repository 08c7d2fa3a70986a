//! Record-shape source generation.
//!
//! Turns a [`Schema`] into Rust source declaring a `table_row!` shape. This is
//! an offline step (`cargo xtask gen-shapes`); nothing here runs while tables
//! load. Output is deterministic for a given schema and options.

use std::fmt::Write as _;

use thiserror::Error;

use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("table name '{0}' is not a valid Rust identifier")]
    InvalidTableName(String),

    #[error("column '{column}' of table '{table}' is not a valid Rust identifier")]
    InvalidIdentifier { table: String, column: String },

    #[error("table '{0}' has no columns")]
    EmptySchema(String),
}

/// Generated source for one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedShape {
    /// `{TableName}{suffix}`, e.g. `MonsterData`.
    pub type_name: String,
    /// Module name, e.g. `monster_data`.
    pub module_name: String,
    pub source: String,
}

impl GeneratedShape {
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module_name)
    }
}

/// Generates shape source from schemas.
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    crate_path: String,
    suffix: String,
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self {
            crate_path: "game_tables".to_string(),
            suffix: crate::RegistryConfig::DEFAULT_SHAPE_SUFFIX.to_string(),
        }
    }
}

impl ShapeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path used to reach `table_row!` from the generated code.
    #[must_use]
    pub fn with_crate_path(mut self, crate_path: impl Into<String>) -> Self {
        self.crate_path = crate_path.into();
        self
    }

    /// Type name suffix; must match the registry's `shape_suffix`.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Generates a shape for `schema`.
    ///
    /// Field names are the column names verbatim; a column that is not a
    /// valid identifier is an error rather than being renamed. `key_column`
    /// is emitted as a `keyed_by` override when given.
    pub fn generate(
        &self,
        schema: &Schema,
        key_column: Option<&str>,
    ) -> Result<GeneratedShape, CodegenError> {
        if !is_identifier(&schema.table_name) {
            return Err(CodegenError::InvalidTableName(schema.table_name.clone()));
        }
        if schema.is_empty() {
            return Err(CodegenError::EmptySchema(schema.table_name.clone()));
        }
        if let Some(column) = schema
            .columns
            .iter()
            .find(|column| !is_identifier(&column.name))
        {
            return Err(CodegenError::InvalidIdentifier {
                table: schema.table_name.clone(),
                column: column.name.clone(),
            });
        }

        let type_name = format!("{}{}", schema.table_name, self.suffix);
        let module_name = to_snake_case(&type_name);

        let mut source = String::new();
        let _ = writeln!(
            source,
            "//! `{}` table shape. Generated by `cargo xtask gen-shapes`; do not edit.",
            schema.table_name
        );
        let lints = lint_allows(schema, &type_name);
        if !lints.is_empty() {
            let _ = writeln!(source, "#![allow({})]", lints.join(", "));
        }
        let _ = writeln!(source);
        let _ = writeln!(source, "{}::table_row! {{", self.crate_path);
        let _ = writeln!(source, "    /// Row of the `{}` table.", schema.table_name);
        match key_column {
            Some(key) => {
                let _ = writeln!(source, "    pub struct {type_name} keyed_by {key:?} {{");
            }
            None => {
                let _ = writeln!(source, "    pub struct {type_name} {{");
            }
        }
        for column in &schema.columns {
            let _ = writeln!(
                source,
                "        pub {}: {},",
                column.name,
                column.column_type.rust_type()
            );
        }
        let _ = writeln!(source, "    }}");
        let _ = writeln!(source, "}}");

        Ok(GeneratedShape {
            type_name,
            module_name,
            source,
        })
    }

    /// Generates a `mod.rs` that declares and re-exports `shapes`.
    pub fn generate_module(&self, shapes: &[GeneratedShape]) -> String {
        let mut sorted: Vec<&GeneratedShape> = shapes.iter().collect();
        sorted.sort_by(|a, b| a.module_name.cmp(&b.module_name));

        let mut source = String::new();
        let _ = writeln!(
            source,
            "//! Table shapes. Generated by `cargo xtask gen-shapes`; do not edit."
        );
        let _ = writeln!(source);
        for shape in &sorted {
            let _ = writeln!(source, "mod {};", shape.module_name);
        }
        let _ = writeln!(source);
        for shape in &sorted {
            let _ = writeln!(source, "pub use {}::{};", shape.module_name, shape.type_name);
        }
        source
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Returns true for a plain (non-raw) Rust identifier that is not a keyword.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_"
        && !KEYWORDS.contains(&name)
}

fn lint_allows(schema: &Schema, type_name: &str) -> Vec<&'static str> {
    let mut lints = Vec::new();
    if schema
        .columns
        .iter()
        .any(|column| column.name != to_snake_case(&column.name))
    {
        lints.push("non_snake_case");
    }
    let first_upper = type_name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if !first_upper || type_name.contains('_') {
        lints.push("non_camel_case_types");
    }
    lints
}

/// `MonsterSkillData` → `monster_skill_data`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnDefinition, ColumnType};

    fn schema(table: &str, columns: &[(&str, ColumnType)]) -> Schema {
        Schema {
            table_name: table.to_string(),
            columns: columns
                .iter()
                .map(|(name, ty)| ColumnDefinition::new(*name, *ty))
                .collect(),
        }
    }

    #[test]
    fn generates_one_field_per_column() {
        let schema = schema(
            "Monster",
            &[
                ("id", ColumnType::Int),
                ("name", ColumnType::String),
                ("speed", ColumnType::Float),
                ("is_boss", ColumnType::Bool),
            ],
        );
        let shape = ShapeGenerator::new().generate(&schema, None).unwrap();

        assert_eq!(shape.type_name, "MonsterData");
        assert_eq!(shape.file_name(), "monster_data.rs");
        assert_eq!(
            shape.source,
            "\
//! `Monster` table shape. Generated by `cargo xtask gen-shapes`; do not edit.

game_tables::table_row! {
    /// Row of the `Monster` table.
    pub struct MonsterData {
        pub id: i32,
        pub name: String,
        pub speed: f32,
        pub is_boss: bool,
    }
}
"
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let schema = schema("Item", &[("id", ColumnType::Int)]);
        let generator = ShapeGenerator::new();
        assert_eq!(
            generator.generate(&schema, None),
            generator.generate(&schema, None)
        );
    }

    #[test]
    fn key_override_and_lints() {
        let schema = schema(
            "Dialogue",
            &[("dialogueId", ColumnType::String), ("Text", ColumnType::String)],
        );
        let shape = ShapeGenerator::new()
            .with_crate_path("crate")
            .generate(&schema, Some("dialogueId"))
            .unwrap();

        assert!(shape.source.contains("#![allow(non_snake_case)]"));
        assert!(shape.source.contains("crate::table_row! {"));
        assert!(
            shape
                .source
                .contains("pub struct DialogueData keyed_by \"dialogueId\" {")
        );
    }

    #[test]
    fn rejects_invalid_identifiers() {
        let generator = ShapeGenerator::new();

        let bad_column = schema("Shop", &[("id", ColumnType::Int), ("type", ColumnType::Int)]);
        assert_eq!(
            generator.generate(&bad_column, None),
            Err(CodegenError::InvalidIdentifier {
                table: "Shop".into(),
                column: "type".into()
            })
        );

        let bad_table = schema("shop-items", &[("id", ColumnType::Int)]);
        assert!(matches!(
            generator.generate(&bad_table, None),
            Err(CodegenError::InvalidTableName(_))
        ));

        let empty = schema("Shop", &[]);
        assert!(matches!(
            generator.generate(&empty, None),
            Err(CodegenError::EmptySchema(_))
        ));
    }

    #[test]
    fn module_lists_shapes_sorted() {
        let generator = ShapeGenerator::new();
        let item = generator
            .generate(&schema("Item", &[("id", ColumnType::Int)]), None)
            .unwrap();
        let dialogue = generator
            .generate(&schema("Dialogue", &[("id", ColumnType::Int)]), None)
            .unwrap();

        let module = generator.generate_module(&[item, dialogue]);
        assert!(module.contains("mod dialogue_data;\nmod item_data;\n"));
        assert!(module.contains("pub use dialogue_data::DialogueData;\npub use item_data::ItemData;\n"));
    }

    #[test]
    fn identifiers_and_snake_case() {
        assert!(is_identifier("hp_max"));
        assert!(is_identifier("_hidden"));
        assert!(!is_identifier("2nd"));
        assert!(!is_identifier("max hp"));
        assert!(!is_identifier("_"));
        assert!(!is_identifier("match"));
        assert_eq!(to_snake_case("MonsterSkillData"), "monster_skill_data");
        assert_eq!(to_snake_case("Stage2Data"), "stage2_data");
        assert_eq!(to_snake_case("hp_max"), "hp_max");
    }
}
