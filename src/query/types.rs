use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::QueryError;

pub const DEFAULT_SORT_BY: &str = "Id";
pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Filter operators. The wire names are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Operator {
    pub const ALL: [Self; 7] = [Self::Eq, Self::Neq, Self::Gt, Self::Gte, Self::Lt, Self::Lte, Self::In];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|op| op.as_str().eq_ignore_ascii_case(s))
    }

    /// `gt`, `gte`, `lt` and `lte` need an orderable field type.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }

    /// Outcome of comparing a record value (left) with the filter value (right).
    /// `In` is a membership test and never accepts a plain ordering.
    #[must_use]
    pub const fn accepts(&self, ord: Ordering) -> bool {
        match self {
            Self::Eq => matches!(ord, Ordering::Equal),
            Self::Neq => !matches!(ord, Ordering::Equal),
            Self::Gt => matches!(ord, Ordering::Greater),
            Self::Gte => matches!(ord, Ordering::Greater | Ordering::Equal),
            Self::Lt => matches!(ord, Ordering::Less),
            Self::Lte => matches!(ord, Ordering::Less | Ordering::Equal),
            Self::In => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Anything other than "desc" (any case) sorts ascending.
impl From<Option<String>> for SortDirection {
    fn from(s: Option<String>) -> Self {
        match s {
            Some(s) if s.trim().eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

impl From<SortDirection> for String {
    fn from(d: SortDirection) -> Self {
        d.as_str().to_owned()
    }
}

/// One constraint on one field.
///
/// The operator is kept as written so that an unknown operator can be
/// reported verbatim when the plan is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    #[serde(default = "default_operator")]
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    #[must_use]
    pub fn new(operator: Operator, value: Value) -> Self {
        Self { operator: operator.as_str().to_owned(), value }
    }

    #[must_use]
    pub fn raw(operator: impl Into<String>, value: Value) -> Self {
        Self { operator: operator.into(), value }
    }

    #[must_use]
    pub fn eq(value: Value) -> Self {
        Self::new(Operator::Eq, value)
    }

    #[must_use]
    pub fn is_in(values: Vec<Value>) -> Self {
        Self::new(Operator::In, Value::Array(values))
    }
}

fn default_operator() -> String {
    Operator::Eq.as_str().to_owned()
}

/// Client-supplied description of a filtered, searched, sorted, paged query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, FilterCondition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<BTreeMap<String, String>>,
    /// `None`, empty or whitespace disables sorting.
    #[serde(default = "default_sort_by")]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_sort_by() -> Option<String> {
    Some(DEFAULT_SORT_BY.to_owned())
}

const fn default_page_number() -> i64 {
    DEFAULT_PAGE_NUMBER
}

const fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for QueryRequest {
    fn default() -> Self {
        Self {
            filter: None,
            search: None,
            sort_by: default_sort_by(),
            sort_direction: SortDirection::Asc,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, condition: FilterCondition) -> Self {
        self.filter.get_or_insert_with(BTreeMap::new).insert(field.into(), condition);
        self
    }

    #[must_use]
    pub fn with_search(mut self, field: impl Into<String>, term: impl Into<String>) -> Self {
        self.search.get_or_insert_with(BTreeMap::new).insert(field.into(), term.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_direction = direction;
        self
    }

    #[must_use]
    pub fn unsorted(mut self) -> Self {
        self.sort_by = None;
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &FilterCondition)> {
        self.filter.iter().flatten().map(|(k, v)| (k.as_str(), v))
    }

    pub fn search_terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.search.iter().flatten().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sort field, if sorting is requested.
    #[must_use]
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn condition_count(&self) -> usize {
        self.filter.as_ref().map_or(0, BTreeMap::len) + self.search.as_ref().map_or(0, BTreeMap::len)
    }
}

/// Skip/take window derived from page number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub take: usize,
}

impl Page {
    /// # Errors
    /// Returns `InvalidPagination` when either argument is below 1.
    pub fn from_request(page_number: i64, page_size: i64) -> Result<Self, QueryError> {
        if page_number < 1 || page_size < 1 {
            return Err(QueryError::InvalidPagination { page_number, page_size });
        }
        let to_usize = |n: i64| usize::try_from(n).unwrap_or(usize::MAX);
        let take = to_usize(page_size);
        Ok(Self { skip: to_usize(page_number - 1).saturating_mul(take), take })
    }
}
