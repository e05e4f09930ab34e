use std::cmp::Ordering;

use super::types::{Operator, SortDirection};
use crate::schema::{FieldValue, ResolvedField};

/// A single record test. All predicates of a plan are ANDed.
#[derive(Debug, Clone)]
pub enum Predicate<'s, R> {
    /// `eq`, `neq`, `gt`, `gte`, `lt`, `lte` against a coerced value.
    Compare { field: ResolvedField<'s, R>, op: Operator, value: FieldValue },
    /// Membership in a coerced candidate list.
    In { field: ResolvedField<'s, R>, values: Vec<FieldValue> },
    /// Case-sensitive substring search on a textual field.
    Contains { field: ResolvedField<'s, R>, term: String },
}

impl<'s, R> Predicate<'s, R> {
    #[must_use]
    pub const fn field(&self) -> &ResolvedField<'s, R> {
        match self {
            Self::Compare { field, .. } | Self::In { field, .. } | Self::Contains { field, .. } => field,
        }
    }

    pub fn matches(&self, record: &R) -> bool {
        match self {
            Self::Compare { field, op, value } => {
                let actual = field.get(record);
                // Ordered comparisons never match a null; eq/neq treat null as a value.
                if op.is_ordered() && (actual.is_null() || value.is_null()) {
                    return false;
                }
                op.accepts(actual.cmp(value))
            }
            Self::In { field, values } => {
                let actual = field.get(record);
                values.contains(&actual)
            }
            Self::Contains { field, term } => field.get(record).as_text().is_some_and(|s| s.contains(term.as_str())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortKey<'s, R> {
    pub field: ResolvedField<'s, R>,
    pub direction: SortDirection,
}

impl<R> SortKey<'_, R> {
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.order(&self.field.get(a), &self.field.get(b))
    }

    /// Order two already-extracted key values in this key's direction.
    #[must_use]
    pub fn order(&self, a: &FieldValue, b: &FieldValue) -> Ordering {
        let ord = a.cmp(b);
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}
