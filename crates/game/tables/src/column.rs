//! Column types and definitions shared by schema extraction, code generation,
//! and binding.

/// Declared type of a table column.
///
/// Header type tokens are matched case-insensitively. `enum` columns carry no
/// symbolic information at load time and bind as plain integers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ColumnType {
    #[strum(to_string = "int", serialize = "enum")]
    Int,
    #[strum(to_string = "float")]
    Float,
    #[strum(to_string = "bool")]
    Bool,
    #[strum(to_string = "string")]
    String,
}

impl ColumnType {
    /// Resolves a header type token.
    ///
    /// Unrecognized tokens fall back to [`ColumnType::String`].
    pub fn from_token(token: &str) -> Self {
        match token.trim().parse::<ColumnType>() {
            Ok(column_type) => column_type,
            Err(_) => ColumnType::String,
        }
    }

    /// Rust type emitted for this column by the shape generator.
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Int => "i32",
            Self::Float => "f32",
            Self::Bool => "bool",
            Self::String => "String",
        }
    }

    /// Returns true for value types that bind empty cells to a zero value.
    pub const fn is_value_type(self) -> bool {
        !matches!(self, Self::String)
    }
}

/// A single named, typed column of a schema.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!(ColumnType::from_token("INT"), ColumnType::Int);
        assert_eq!(ColumnType::from_token("Float"), ColumnType::Float);
        assert_eq!(ColumnType::from_token("bOoL"), ColumnType::Bool);
        assert_eq!(ColumnType::from_token("string"), ColumnType::String);
    }

    #[test]
    fn enum_token_maps_to_int() {
        assert_eq!(ColumnType::from_token("enum"), ColumnType::Int);
        assert_eq!(ColumnType::from_token(" Enum "), ColumnType::Int);
        assert_eq!(ColumnType::Int.to_string(), "int");
    }

    #[test]
    fn unknown_tokens_fall_back_to_string() {
        assert_eq!(ColumnType::from_token("vector3"), ColumnType::String);
        assert_eq!(ColumnType::from_token("int[]"), ColumnType::String);
    }
}
