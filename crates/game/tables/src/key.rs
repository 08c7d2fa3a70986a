//! Table key types.

use std::fmt;
use std::hash::Hash;

use crate::column::ColumnType;
use crate::convert::CellValue;

/// Runtime tag for the key type chosen for a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum KeyType {
    Int,
    String,
}

impl KeyType {
    /// Key type for a key column of the given declared type.
    ///
    /// Floats and booleans cannot key a table.
    pub const fn for_column(column_type: ColumnType) -> Option<Self> {
        match column_type {
            ColumnType::Int => Some(Self::Int),
            ColumnType::String => Some(Self::String),
            ColumnType::Float | ColumnType::Bool => None,
        }
    }
}

/// A type usable as a table key.
///
/// Integer columns key as `i64` whatever the field width; string columns key
/// as `String`.
pub trait TableKey:
    CellValue + Eq + Hash + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const KEY_TYPE: KeyType;
}

impl TableKey for i64 {
    const KEY_TYPE: KeyType = KeyType::Int;
}

impl TableKey for String {
    const KEY_TYPE: KeyType = KeyType::String;
}
