use thiserror::Error;

use crate::query::Operator;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Field not found: '{field}' on {record}")]
    FieldNotFound { field: String, record: &'static str },

    #[error("Type mismatch on '{field}': expected {expected}, got {value}")]
    TypeMismatch { field: String, expected: String, value: String },

    #[error("Unknown operator '{operator}' on field '{field}'")]
    UnknownOperator { operator: String, field: String },

    #[error("Operator '{operator}' is not supported on '{field}' of type {field_type}")]
    UnsupportedOperator { operator: Operator, field: String, field_type: String },

    #[error("Invalid pagination: pageNumber={page_number}, pageSize={page_size} (both must be >= 1)")]
    InvalidPagination { page_number: i64, page_size: i64 },

    #[error("Limit exceeded: {what} is {actual}, maximum is {limit}")]
    LimitExceeded { what: &'static str, limit: usize, actual: usize },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config: {0}")]
    Config(#[from] toml::de::Error),
}

impl QueryError {
    /// The request field this error is about, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldNotFound { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::UnknownOperator { field, .. }
            | Self::UnsupportedOperator { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(
        field: &str,
        expected: impl Into<String>,
        value: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch { field: field.to_owned(), expected: expected.into(), value: value.to_string() }
    }
}
