use std::cmp::Ordering;

use super::eval::{Predicate, SortKey};
use super::types::{Operator, Page, QueryRequest};
use crate::config::QueryConfig;
use crate::errors::QueryError;
use crate::schema::{Record, Schema};

/// Filters and search terms conjoined, an optional sort key and a page window.
///
/// A plan is validated completely when built: every field is resolved, every
/// operator recognised and every value coerced before any record is touched.
/// Its parts are public so that a store adapter can translate them instead of
/// evaluating records in memory.
pub struct QueryPlan<'s, R> {
    schema: &'s Schema<R>,
    predicates: Vec<Predicate<'s, R>>,
    sort: Option<SortKey<'s, R>>,
    page: Page,
}

impl<R: Record> QueryPlan<'static, R> {
    /// Build against the record type's registered schema with default limits.
    ///
    /// # Errors
    /// See [`QueryPlan::build_with`].
    pub fn for_record(request: &QueryRequest) -> Result<Self, QueryError> {
        Self::build(R::schema(), request)
    }
}

impl<'s, R> QueryPlan<'s, R> {
    /// # Errors
    /// See [`QueryPlan::build_with`].
    pub fn build(schema: &'s Schema<R>, request: &QueryRequest) -> Result<Self, QueryError> {
        Self::build_with(schema, request, &QueryConfig::default())
    }

    /// Validate `request` against `schema` and compose the plan.
    ///
    /// Steps run in a fixed order (filters, search, sort, paging) and the first
    /// invalid item aborts the build.
    ///
    /// # Errors
    /// `FieldNotFound`, `UnknownOperator`, `UnsupportedOperator`, `TypeMismatch`,
    /// `InvalidPagination` or `LimitExceeded`.
    pub fn build_with(schema: &'s Schema<R>, request: &QueryRequest, config: &QueryConfig) -> Result<Self, QueryError> {
        let plan = Self::compose(schema, request, config)
            .inspect_err(|e| log::debug!("rejected query on {}: {e}", schema.name()))?;
        log::debug!(
            "query plan on {}: {} predicate(s), sort={}, skip={}, take={}",
            schema.name(),
            plan.predicates.len(),
            plan.sort.as_ref().map_or_else(|| "none".to_owned(), |k| format!("{} {}", k.field.name(), k.direction.as_str())),
            plan.page.skip,
            plan.page.take
        );
        Ok(plan)
    }

    fn compose(schema: &'s Schema<R>, request: &QueryRequest, config: &QueryConfig) -> Result<Self, QueryError> {
        let ci = config.case_insensitive_fields;
        let conditions = request.condition_count();
        if conditions > config.max_conditions {
            log::warn!("too many query conditions on {}: {conditions}", schema.name());
            return Err(QueryError::LimitExceeded {
                what: "filter and search conditions",
                limit: config.max_conditions,
                actual: conditions,
            });
        }
        let mut predicates = Vec::with_capacity(conditions);

        for (name, condition) in request.filters() {
            let field = schema.resolve(name, ci)?;
            let op = Operator::parse(&condition.operator).ok_or_else(|| QueryError::UnknownOperator {
                operator: condition.operator.clone(),
                field: name.to_owned(),
            })?;
            let predicate = if op == Operator::In {
                let len = condition.value.as_array().map_or(0, Vec::len);
                if len > config.max_in_values {
                    log::warn!("'in' list on {name} too long: {len}");
                    return Err(QueryError::LimitExceeded {
                        what: "'in' candidate list",
                        limit: config.max_in_values,
                        actual: len,
                    });
                }
                Predicate::In { values: field.coerce_list(&condition.value)?, field }
            } else {
                if op.is_ordered() && !field.field_type().is_orderable() {
                    return Err(QueryError::UnsupportedOperator {
                        operator: op,
                        field: name.to_owned(),
                        field_type: field.field_type().to_string(),
                    });
                }
                let value = field.coerce(&condition.value)?;
                if op.is_ordered() && value.is_null() {
                    return Err(QueryError::type_mismatch(
                        name,
                        format!("non-null {}", field.field_type()),
                        &condition.value,
                    ));
                }
                Predicate::Compare { field, op, value }
            };
            predicates.push(predicate);
        }

        for (name, term) in request.search_terms() {
            let field = schema.resolve(name, ci)?;
            if !field.field_type().is_searchable() {
                return Err(QueryError::TypeMismatch {
                    field: name.to_owned(),
                    expected: "text".to_owned(),
                    value: format!("{} field", field.field_type()),
                });
            }
            predicates.push(Predicate::Contains { field, term: term.to_owned() });
        }

        let sort = match request.sort_field() {
            Some(name) => Some(SortKey { field: schema.resolve(name, ci)?, direction: request.sort_direction }),
            None => None,
        };

        let page = Page::from_request(request.page_number, request.page_size)?;
        if page.take > config.max_page_size {
            log::warn!("page size on {} too large: {}", schema.name(), page.take);
            return Err(QueryError::LimitExceeded { what: "pageSize", limit: config.max_page_size, actual: page.take });
        }

        Ok(Self { schema, predicates, sort, page })
    }

    #[must_use]
    pub const fn schema(&self) -> &'s Schema<R> {
        self.schema
    }

    #[must_use]
    pub fn predicates(&self) -> &[Predicate<'s, R>] {
        &self.predicates
    }

    #[must_use]
    pub const fn sort(&self) -> Option<&SortKey<'s, R>> {
        self.sort.as_ref()
    }

    #[must_use]
    pub const fn window(&self) -> Page {
        self.page
    }

    /// True when `record` passes every filter and search term.
    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Sort order of two records; `Equal` when the plan has no sort key.
    pub fn compare(&self, a: &R, b: &R) -> Ordering {
        self.sort.as_ref().map_or(Ordering::Equal, |k| k.compare(a, b))
    }
}
