//! Error types for union resolution and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during `$ref` resolution, branch matching, and switching.
#[derive(Debug, Error)]
pub enum ResolveError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Schema errors (exit code 2)
    #[error("unresolvable reference \"{reference}\": no matching definition")]
    UnresolvedRef { reference: String },

    #[error("circular reference detected while resolving \"{reference}\"")]
    CircularRef { reference: String },

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("option index {index} out of range: union has {count} branch(es)")]
    OptionOutOfRange { index: usize, count: usize },
}

/// Errors during validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("validation failed with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ResolveError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::FileNotFound { .. } | ResolveError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Resolve(e) => e.exit_code(),
            ValidateError::Invalid { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_exit_codes() {
        let err = ResolveError::FileNotFound {
            path: PathBuf::from("schema.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = ResolveError::UnresolvedRef {
            reference: "#/definitions/Missing".into(),
        };
        assert_eq!(err.exit_code(), 2);

        let err = ResolveError::OptionOutOfRange { index: 4, count: 2 };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn validate_error_exit_codes() {
        let err = ValidateError::Invalid {
            errors: vec![SchemaError {
                path: "/name".into(),
                message: "expected string".into(),
            }],
        };
        assert_eq!(err.exit_code(), 1);

        let err = ValidateError::Resolve(ResolveError::CircularRef {
            reference: "#/definitions/Loop".into(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn schema_error_display() {
        let err = SchemaError {
            path: "/address/zip".into(),
            message: "expected string, got number".into(),
        };
        assert_eq!(err.to_string(), "/address/zip: expected string, got number");
    }
}
