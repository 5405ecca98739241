//! Error types for form engine operations

use thiserror::Error;

/// Violations of the component table header contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Component table has no header row")]
    MissingHeader,

    #[error("Anchor column '{anchor}' not found in component table header")]
    AnchorNotFound { anchor: String },

    #[error("Property column {column} has a blank label")]
    BlankLabel { column: usize },

    #[error("Property column '{name}' appears more than once")]
    DuplicateProperty { name: String },
}

/// Component row construction errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("A component row tagged '{tag}' already exists")]
    DuplicateTag { tag: String },

    #[error("No component row tagged '{tag}'")]
    UnknownTag { tag: String },

    #[error("Field error: {0}")]
    Field(#[from] FieldError),
}

/// Durable key-value storage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage I/O failed: {reason}")]
    Io { reason: String },

    #[error("Storage quota exceeded writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("Storage backing data is corrupt: {reason}")]
    Corrupt { reason: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            reason: err.to_string(),
        }
    }
}

/// Field edit errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{name}' is read-only")]
    ReadOnly { name: String },

    #[error("No field with id {id}")]
    UnknownField { id: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display_anchor() {
        let err = SchemaError::AnchorNotFound {
            anchor: "Cost".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Anchor column"));
        assert!(msg.contains("Cost"));
    }

    #[test]
    fn test_row_error_wraps_schema() {
        let err = RowError::from(SchemaError::MissingHeader);
        assert!(matches!(err, RowError::Schema(SchemaError::MissingHeader)));
        assert!(format!("{}", err).contains("no header row"));
    }

    #[test]
    fn test_store_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(io);
        assert!(matches!(err, StoreError::Io { ref reason } if reason.contains("denied")));
    }
}
