//! Type-directed cell conversion.
//!
//! Conversion is total: every call produces a value. When a cell cannot be
//! parsed the target's default is used and a [`ConvertError`] is returned
//! alongside it so the caller can report the defect with row context.
//!
//! Rules, in order:
//! 1. The cell is trimmed.
//! 2. An empty cell yields the default (zero, `false`, `""`, or `None`).
//! 3. Booleans accept integers first (nonzero is true), then `true`/`false`.
//! 4. Numbers use Rust's locale-independent parsers.
//! 5. Strings pass through.

use std::fmt;

use thiserror::Error;

use crate::column::ColumnType;

/// Failure to parse a non-empty cell into its target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value:?} to {target} ({rust_type})")]
pub struct ConvertError {
    pub value: String,
    pub target: ColumnType,
    pub rust_type: &'static str,
}

/// A Rust type that a table cell can bind to.
///
/// `Default` supplies the value for empty cells and failed conversions.
pub trait CellValue: Default + Sized {
    /// Declared column type this Rust type corresponds to.
    const COLUMN_TYPE: ColumnType;

    /// Parses a trimmed, non-empty cell.
    fn parse_cell(cell: &str) -> Option<Self>;
}

macro_rules! impl_cell_value {
    ($column_type:expr => $($ty:ty),+) => {
        $(
            impl CellValue for $ty {
                const COLUMN_TYPE: ColumnType = $column_type;

                fn parse_cell(cell: &str) -> Option<Self> {
                    cell.parse().ok()
                }
            }
        )+
    };
}

impl_cell_value!(ColumnType::Int => i8, i16, i32, i64, u8, u16, u32, u64);
impl_cell_value!(ColumnType::Float => f32, f64);

impl CellValue for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Bool;

    fn parse_cell(cell: &str) -> Option<Self> {
        if let Ok(number) = cell.parse::<i64>() {
            return Some(number != 0);
        }
        if cell.eq_ignore_ascii_case("true") {
            Some(true)
        } else if cell.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl CellValue for String {
    const COLUMN_TYPE: ColumnType = ColumnType::String;

    fn parse_cell(cell: &str) -> Option<Self> {
        Some(cell.to_string())
    }
}

/// Explicitly nullable wrapper: empty cells bind to `None`.
impl<T: CellValue> CellValue for Option<T> {
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;

    fn parse_cell(cell: &str) -> Option<Self> {
        T::parse_cell(cell).map(Some)
    }
}

/// Result of a conversion: always a value, sometimes an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub error: Option<ConvertError>,
}

impl<T> Converted<T> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Splits into the value and a `Result` carrying any error.
    pub fn split(self) -> (T, Result<(), ConvertError>) {
        let result = match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        };
        (self.value, result)
    }
}

/// Converts a raw cell into `T`.
pub fn convert<T: CellValue>(raw: &str) -> Converted<T> {
    let cell = raw.trim();
    if cell.is_empty() {
        return Converted {
            value: T::default(),
            error: None,
        };
    }

    match T::parse_cell(cell) {
        Some(value) => Converted { value, error: None },
        None => Converted {
            value: T::default(),
            error: Some(ConvertError {
                value: cell.to_string(),
                target: T::COLUMN_TYPE,
                rust_type: std::any::type_name::<T>(),
            }),
        },
    }
}

/// A cell converted by declared column type rather than Rust type.
///
/// Used by tooling that only has a [`Schema`](crate::Schema) at hand.
#[derive(Debug, Clone, PartialEq)]
pub enum CellData {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl fmt::Display for CellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value:?}"),
        }
    }
}

/// Converts a raw cell according to a declared column type.
pub fn convert_dynamic(raw: &str, column_type: ColumnType) -> Converted<CellData> {
    fn lift<T>(converted: Converted<T>, wrap: fn(T) -> CellData) -> Converted<CellData> {
        Converted {
            value: wrap(converted.value),
            error: converted.error,
        }
    }

    match column_type {
        ColumnType::Int => lift(convert::<i64>(raw), CellData::Int),
        ColumnType::Float => lift(convert::<f64>(raw), CellData::Float),
        ColumnType::Bool => lift(convert::<bool>(raw), CellData::Bool),
        ColumnType::String => lift(convert::<String>(raw), CellData::String),
    }
}
