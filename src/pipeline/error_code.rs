//! Stable machine-readable codes for spec diagnostics.

use std::fmt;

use serde::Serialize;

/// Category of a spec validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec version is not understood by this build
    UnsupportedVersion,
    /// A numeric parameter is outside its valid range
    OutOfRange,
    /// A value is well-typed but unusable (e.g. an empty delimiter set)
    InvalidValue,
    /// A field is not part of the schema
    UnknownField,
}

impl ErrorCode {
    /// Returns the identifier used in JSON and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::OutOfRange => "out_of_range",
            Self::InvalidValue => "invalid_value",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_display_string() {
        for code in [
            ErrorCode::UnsupportedVersion,
            ErrorCode::OutOfRange,
            ErrorCode::InvalidValue,
            ErrorCode::UnknownField,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.to_string());
        }
    }
}
