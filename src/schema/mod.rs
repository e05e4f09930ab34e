//! Typed field access by name: declared field types, runtime values,
//! request-value coercion and the per-record-type field registry.

mod coerce;
mod registry;
mod types;

pub use coerce::{coerce, coerce_list};
pub use registry::{FieldDef, Getter, Record, ResolvedField, Schema, SchemaBuilder};
pub use types::{FieldType, FieldValue};
