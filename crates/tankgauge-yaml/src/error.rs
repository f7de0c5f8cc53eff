//! Error types for YAML parsing.

use std::fmt;

/// Error type for manifest parsing.
#[derive(Debug)]
pub enum ParseError {
    /// YAML parsing error
    Yaml(serde_yaml_ng::Error),
    /// Invalid value
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },
}

impl ParseError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml(e) => write!(f, "YAML error: {e}"),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yaml(e) => Some(e),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ParseError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::invalid("arrow.direction", "expected up, down or none");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'arrow.direction': expected up, down or none"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_from_yaml() {
        let yaml_err = serde_yaml_ng::from_str::<serde_yaml_ng::Value>("{{").unwrap_err();
        let err: ParseError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error:"));
        assert!(err.source().is_some());
    }
}
