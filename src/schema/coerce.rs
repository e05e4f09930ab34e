//! Conversion of request values into a field's declared type.
//!
//! Every rule is deterministic: a value either converts exactly or is rejected
//! with `QueryError::TypeMismatch`. Nothing is truncated or rounded.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use ordered_float::OrderedFloat;
use serde_json::Value;
use uuid::Uuid;

use super::types::{FieldType, FieldValue};
use crate::errors::QueryError;

/// Coerce `value` to `ty` for the field named `field`.
///
/// # Errors
/// Returns `TypeMismatch` naming the field, the expected type and the value.
pub fn coerce(field: &str, ty: FieldType, nullable: bool, value: &Value) -> Result<FieldValue, QueryError> {
    if value.is_null() {
        return if nullable {
            Ok(FieldValue::Null)
        } else {
            Err(QueryError::type_mismatch(field, format!("non-null {ty}"), value))
        };
    }
    let out = match ty {
        FieldType::Bool => coerce_bool(value),
        FieldType::Int => coerce_int(value),
        FieldType::Float => coerce_float(value),
        FieldType::Text => coerce_text(value),
        FieldType::Uuid => value.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok()).map(FieldValue::Uuid),
        FieldType::DateTime => value.as_str().and_then(parse_datetime).map(FieldValue::DateTime),
        FieldType::Enum(variants) => value.as_str().and_then(|s| {
            variants.iter().find(|v| v.eq_ignore_ascii_case(s.trim())).map(|v| FieldValue::Enum((*v).to_owned()))
        }),
    };
    out.ok_or_else(|| QueryError::type_mismatch(field, ty.to_string(), value))
}

/// Coerce every element of a JSON array (for `in`).
///
/// # Errors
/// Fails on a non-array value or on the first element that does not convert.
pub fn coerce_list(
    field: &str,
    ty: FieldType,
    nullable: bool,
    value: &Value,
) -> Result<Vec<FieldValue>, QueryError> {
    let Value::Array(items) = value else {
        return Err(QueryError::type_mismatch(field, format!("array of {ty}"), value));
    };
    items.iter().map(|v| coerce(field, ty, nullable, v)).collect()
}

fn coerce_bool(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(FieldValue::Bool(true)),
            "false" => Some(FieldValue::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coerce_int(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(FieldValue::Int(i));
            }
            // 9.0 is accepted, 9.5 is not; i64::MAX as f64 rounds up, hence the strict bound.
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| FieldValue::Int(f as i64))
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(FieldValue::Int),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<FieldValue> {
    let f = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(FieldValue::Float(OrderedFloat(f)))
}

fn coerce_text(value: &Value) -> Option<FieldValue> {
    match value {
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Number(n) => Some(FieldValue::Text(n.to_string())),
        Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc())
}
