use serde_json::Value;
use std::fmt;

use super::coerce::{coerce, coerce_list};
use super::types::{FieldType, FieldValue};
use crate::errors::QueryError;

/// Reads one field out of a record.
pub type Getter<R> = fn(&R) -> FieldValue;

/// A record type that can be queried by field name.
///
/// Implementors usually keep their schema in a `LazyLock` static:
///
/// ```
/// use recordquery::{FieldType, Record, Schema};
/// use std::sync::LazyLock;
///
/// struct Item { id: i64, name: String }
///
/// static ITEM: LazyLock<Schema<Item>> = LazyLock::new(|| {
///     Schema::builder("Item")
///         .field("Id", FieldType::Int, |i: &Item| i.id.into())
///         .field("Name", FieldType::Text, |i: &Item| i.name.as_str().into())
///         .build()
/// });
///
/// impl Record for Item {
///     fn schema() -> &'static Schema<Self> {
///         &ITEM
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    fn schema() -> &'static Schema<Self>;
}

pub struct FieldDef<R> {
    pub name: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
    getter: Getter<R>,
}

/// Field-name to accessor mapping for one record type.
pub struct Schema<R> {
    name: &'static str,
    fields: Vec<FieldDef<R>>,
    case_insensitive: bool,
}

impl<R> Schema<R> {
    #[must_use]
    pub const fn builder(name: &'static str) -> SchemaBuilder<R> {
        SchemaBuilder { name, fields: Vec::new(), case_insensitive: true }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter()
    }

    /// Resolve `field` to a typed accessor.
    ///
    /// An exact name match wins; otherwise an ASCII case-insensitive match is
    /// tried unless disabled for this schema or by `case_insensitive`.
    ///
    /// # Errors
    /// Returns `FieldNotFound` when no field matches.
    pub fn resolve(&self, field: &str, case_insensitive: bool) -> Result<ResolvedField<'_, R>, QueryError> {
        let field = field.trim();
        self.fields
            .iter()
            .find(|d| d.name == field)
            .or_else(|| {
                (case_insensitive && self.case_insensitive)
                    .then(|| self.fields.iter().find(|d| d.name.eq_ignore_ascii_case(field)))
                    .flatten()
            })
            .map(|def| ResolvedField { requested: field.to_owned(), def })
            .ok_or_else(|| QueryError::FieldNotFound { field: field.to_owned(), record: self.name })
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields.iter().map(|d| (d.name, d.field_type)).collect::<Vec<_>>())
            .finish()
    }
}

pub struct SchemaBuilder<R> {
    name: &'static str,
    fields: Vec<FieldDef<R>>,
    case_insensitive: bool,
}

impl<R> SchemaBuilder<R> {
    /// Register a non-nullable field. A later registration with the same name replaces it.
    #[must_use]
    pub fn field(self, name: &'static str, field_type: FieldType, getter: Getter<R>) -> Self {
        self.push(FieldDef { name, field_type, nullable: false, getter })
    }

    /// Register a field whose getter may return `FieldValue::Null`.
    #[must_use]
    pub fn nullable(self, name: &'static str, field_type: FieldType, getter: Getter<R>) -> Self {
        self.push(FieldDef { name, field_type, nullable: true, getter })
    }

    /// Require exact field-name matches for this record type.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    #[must_use]
    pub fn build(self) -> Schema<R> {
        Schema { name: self.name, fields: self.fields, case_insensitive: self.case_insensitive }
    }

    fn push(mut self, def: FieldDef<R>) -> Self {
        self.fields.retain(|d| d.name != def.name);
        self.fields.push(def);
        self
    }
}

/// A field name bound to its accessor and declared type for one query build.
pub struct ResolvedField<'s, R> {
    requested: String,
    def: &'s FieldDef<R>,
}

impl<R> ResolvedField<'_, R> {
    /// Registered (canonical) field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.def.name
    }

    /// Name as written in the request; used in error messages.
    #[must_use]
    pub fn requested(&self) -> &str {
        &self.requested
    }

    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.def.field_type
    }

    #[must_use]
    pub const fn nullable(&self) -> bool {
        self.def.nullable
    }

    /// Read the field, normalised to its declared type.
    ///
    /// A getter returning a variant that cannot stand for the declared type
    /// is a registration bug: it is logged, and asserted in debug builds.
    pub fn get(&self, record: &R) -> FieldValue {
        let ty = self.def.field_type;
        let value = (self.def.getter)(record).normalize_for(ty);
        let conforms = value.conforms_to(ty);
        if !conforms {
            log::warn!("getter for {} declared {ty} returned {value:?}", self.def.name);
        }
        debug_assert!(conforms, "getter for {} declared {ty} returned {value:?}", self.def.name);
        value
    }

    /// # Errors
    /// Returns `TypeMismatch` when `value` does not convert to this field's type.
    pub fn coerce(&self, value: &Value) -> Result<FieldValue, QueryError> {
        coerce(&self.requested, self.def.field_type, self.def.nullable, value)
    }

    /// # Errors
    /// Returns `TypeMismatch` for a non-array value or any unconvertible element.
    pub fn coerce_list(&self, value: &Value) -> Result<Vec<FieldValue>, QueryError> {
        coerce_list(&self.requested, self.def.field_type, self.def.nullable, value)
    }
}

impl<R> Clone for ResolvedField<'_, R> {
    fn clone(&self) -> Self {
        Self { requested: self.requested.clone(), def: self.def }
    }
}

impl<R> fmt::Debug for ResolvedField<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedField")
            .field("name", &self.def.name)
            .field("type", &self.def.field_type)
            .field("nullable", &self.def.nullable)
            .finish()
    }
}
