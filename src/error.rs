use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

pub const INVALID_STRUCTURE: &str = "Invalid dashboard data structure";

/// Raised by strict validation. `field` and `value` point at the first check
/// that failed, when one could be identified.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}{}", field_suffix(.field))]
pub struct ValidationError {
    pub message: String,
    pub field: Option<String>,
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            value: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(f) => format!(" (field: {f})"),
        None => String::new(),
    }
}

/// Why a single field could not be salvaged during partial recovery.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("{0} is not an array")]
    NotAnArray(&'static str),

    #[error("malformed {field}: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fixture path not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_includes_field() {
        let err = ValidationError::new(INVALID_STRUCTURE)
            .with_field("currentUser.email")
            .with_value(json!("nope"));
        assert_eq!(
            err.to_string(),
            "Invalid dashboard data structure (field: currentUser.email)"
        );
        assert_eq!(err.value, Some(json!("nope")));
    }

    #[test]
    fn test_display_without_field() {
        let err = ValidationError::new(INVALID_STRUCTURE);
        assert_eq!(err.to_string(), INVALID_STRUCTURE);
    }
}
