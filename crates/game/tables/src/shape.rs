//! Type-erased shape descriptors for discovery and loading.

use std::any::{Any, TypeId};

use crate::binder;
use crate::column::ColumnType;
use crate::config::TableLayout;
use crate::diagnostics::Diagnostics;
use crate::error::TableError;
use crate::key::{KeyType, TableKey};
use crate::row::TableRow;

/// Name and declared type of one shape field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub column_type: ColumnType,
}

/// Everything the registry needs to load a shape without knowing its type.
///
/// Created with [`ShapeDescriptor::of`]; `table_row!` submits one per shape.
#[derive(Clone, Copy)]
pub struct ShapeDescriptor {
    type_name: &'static str,
    key_column: Option<&'static str>,
    shape_id: fn() -> TypeId,
    fields: fn() -> Vec<FieldInfo>,
    load: fn(&LoadRequest<'_>, &mut Diagnostics) -> Result<LoadedTable, TableError>,
}

inventory::collect!(ShapeDescriptor);

impl ShapeDescriptor {
    pub const fn of<R: TableRow>() -> Self {
        Self {
            type_name: R::SHAPE_NAME,
            key_column: R::KEY_COLUMN,
            shape_id: TypeId::of::<R>,
            fields: field_infos::<R>,
            load: load_shape::<R>,
        }
    }

    /// All shapes registered through `table_row!`.
    pub fn registered() -> impl Iterator<Item = &'static ShapeDescriptor> {
        inventory::iter::<ShapeDescriptor>.into_iter()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Key column declared by the shape, if any.
    pub fn key_column(&self) -> Option<&'static str> {
        self.key_column
    }

    pub fn shape_id(&self) -> TypeId {
        (self.shape_id)()
    }

    pub fn fields(&self) -> Vec<FieldInfo> {
        (self.fields)()
    }

    pub(crate) fn load(
        &self,
        request: &LoadRequest<'_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<LoadedTable, TableError> {
        (self.load)(request, diagnostics)
    }
}

impl std::fmt::Debug for ShapeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDescriptor")
            .field("type_name", &self.type_name)
            .field("key_column", &self.key_column)
            .finish_non_exhaustive()
    }
}

/// Metadata of a loaded table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfo {
    pub table_name: String,
    pub shape_name: &'static str,
    pub key_column: String,
    pub key_type: KeyType,
    pub rows: usize,
}

pub(crate) struct LoadRequest<'a> {
    pub table_name: &'a str,
    pub text: &'a str,
    pub key_column: &'a str,
    pub layout: &'a TableLayout,
}

/// A bound container with its key type erased.
pub(crate) struct LoadedTable {
    pub info: TableInfo,
    pub container: Box<dyn Any + Send + Sync>,
}

fn field_infos<R: TableRow>() -> Vec<FieldInfo> {
    R::FIELDS
        .iter()
        .map(|field| FieldInfo {
            name: field.name,
            column_type: field.column_type,
        })
        .collect()
}

/// Picks the key type from the key field's column type, then binds.
fn load_shape<R: TableRow>(
    request: &LoadRequest<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<LoadedTable, TableError> {
    let field = R::field(request.key_column).ok_or_else(|| TableError::MissingKeyField {
        shape: R::SHAPE_NAME,
        column: request.key_column.to_string(),
    })?;

    match KeyType::for_column(field.column_type) {
        Some(KeyType::Int) => bind_erased::<i64, R>(request, diagnostics),
        Some(KeyType::String) => bind_erased::<String, R>(request, diagnostics),
        None => Err(TableError::UnsupportedKeyType {
            shape: R::SHAPE_NAME,
            column: request.key_column.to_string(),
            column_type: field.column_type,
        }),
    }
}

fn bind_erased<K: TableKey, R: TableRow>(
    request: &LoadRequest<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<LoadedTable, TableError> {
    let container = binder::parse::<K, R>(
        request.table_name,
        request.text,
        request.key_column,
        request.layout,
        diagnostics,
    )?;

    Ok(LoadedTable {
        info: TableInfo {
            table_name: request.table_name.to_string(),
            shape_name: R::SHAPE_NAME,
            key_column: request.key_column.to_string(),
            key_type: K::KEY_TYPE,
            rows: container.len(),
        },
        container: Box::new(container),
    })
}
