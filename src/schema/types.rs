use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int,
    /// Also used for decimal quantities such as prices.
    Float,
    Text,
    Uuid,
    DateTime,
    /// Closed set of variant names.
    Enum(&'static [&'static str]),
}

impl FieldType {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::DateTime => "datetime",
            Self::Enum(_) => "enum",
        }
    }

    /// Whether `gt`/`gte`/`lt`/`lte` may be used on this type.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Text | Self::DateTime)
    }

    /// Whether substring search may be used on this type.
    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        matches!(self, Self::Text | Self::Enum(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(variants) => write!(f, "enum({})", variants.join("|")),
            other => f.write_str(other.type_name()),
        }
    }
}

/// A field value read from a record or coerced from request input.
///
/// Values are totally ordered. `Null` sorts before everything else; values
/// of different non-null variants never meet after coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Text(String),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Enum(String),
}

impl FieldValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text view used by substring search.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value can stand for a field declared as `ty`.
    /// `Null` conforms to every type; nullability is checked elsewhere.
    #[must_use]
    pub fn conforms_to(&self, ty: FieldType) -> bool {
        match (self, ty) {
            (Self::Null, _)
            | (Self::Bool(_), FieldType::Bool)
            | (Self::Int(_), FieldType::Int)
            | (Self::Float(_), FieldType::Float)
            | (Self::Text(_), FieldType::Text)
            | (Self::Uuid(_), FieldType::Uuid)
            | (Self::DateTime(_), FieldType::DateTime) => true,
            (Self::Enum(s), FieldType::Enum(variants)) => variants.contains(&s.as_str()),
            _ => false,
        }
    }

    /// Bring a getter's value into the variant `ty` compares with: integers
    /// widen to `Float`, and text naming a variant (any case) becomes the
    /// canonical `Enum`. Anything else is returned unchanged.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalize_for(self, ty: FieldType) -> Self {
        match (self, ty) {
            (Self::Int(i), FieldType::Float) => Self::Float(OrderedFloat(i as f64)),
            (Self::Text(s) | Self::Enum(s), FieldType::Enum(variants)) => {
                match variants.iter().find(|v| v.eq_ignore_ascii_case(&s)) {
                    Some(v) => Self::Enum((*v).to_owned()),
                    None => Self::Text(s),
                }
            }
            (other, _) => other,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(OrderedFloat(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_orders_first() {
        let mut vals = vec![FieldValue::from(3i64), FieldValue::Null, FieldValue::from(-1i64)];
        vals.sort();
        assert_eq!(vals, vec![FieldValue::Null, FieldValue::Int(-1), FieldValue::Int(3)]);
    }

    #[test]
    fn option_maps_to_null() {
        let none: Option<f64> = None;
        assert!(FieldValue::from(none).is_null());
        assert_eq!(FieldValue::from(Some(2.5)), FieldValue::Float(OrderedFloat(2.5)));
    }

    #[test]
    fn orderable_and_searchable_sets() {
        assert!(FieldType::Float.is_orderable());
        assert!(!FieldType::Uuid.is_orderable());
        assert!(!FieldType::Bool.is_orderable());
        assert!(FieldType::Enum(&["A"]).is_searchable());
        assert!(!FieldType::Int.is_searchable());
        assert_eq!(FieldType::Enum(&["Active", "Pending"]).to_string(), "enum(Active|Pending)");
    }

    #[test]
    fn normalize_widens_ints_and_canonicalises_enums() {
        let status = FieldType::Enum(&["Active", "Draft"]);
        assert_eq!(FieldValue::Int(7).normalize_for(FieldType::Float), FieldValue::from(7.0));
        assert_eq!(FieldValue::from("active").normalize_for(status), FieldValue::Enum("Active".into()));
        assert!(FieldValue::from("Active").normalize_for(status).conforms_to(status));
        assert!(!FieldValue::from("Archived").normalize_for(status).conforms_to(status));
        assert_eq!(FieldValue::Int(7).normalize_for(FieldType::Int), FieldValue::Int(7));
        assert!(!FieldValue::Int(7).conforms_to(FieldType::Text));
        assert!(FieldValue::Null.conforms_to(FieldType::Uuid));
    }
}
