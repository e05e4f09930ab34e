use crate::errors::QueryError;

use super::types::QueryRequest;

/// Parse a wire-level JSON request body.
///
/// # Errors
/// Returns an error if the JSON string cannot be parsed into a request.
pub fn parse_request_json(json: &str) -> Result<QueryRequest, QueryError> {
    Ok(serde_json::from_str(json)?)
}

/// # Errors
/// Returns an error if the JSON value does not have the request shape.
pub fn parse_request_value(value: serde_json::Value) -> Result<QueryRequest, QueryError> {
    Ok(serde_json::from_value(value)?)
}
