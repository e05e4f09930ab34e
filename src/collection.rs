use crate::config::QueryConfig;
use crate::errors::QueryError;
use crate::query::{QueryPlan, QueryRequest, parse_request_json};
use crate::schema::Record;
use crate::utils::devlog::QueryBench;
use parking_lot::RwLock;

/// In-memory record source. Queries take a shared lock, so concurrent
/// `find` calls do not block each other.
pub struct Collection<R> {
    records: RwLock<Vec<R>>,
    config: QueryConfig,
}

impl<R: Record + Clone> Collection<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: QueryConfig) -> Self {
        Self { records: RwLock::new(Vec::new()), config }
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn insert(&self, record: R) {
        self.records.write().push(record);
    }

    pub fn extend(&self, records: impl IntoIterator<Item = R>) {
        self.records.write().extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Return the requested page, in insertion order unless the request sorts.
    ///
    /// # Errors
    /// Any plan validation error; the store is not read in that case.
    pub fn find(&self, request: &QueryRequest) -> Result<Vec<R>, QueryError> {
        let bench = QueryBench::start("find", R::schema().name());
        let plan = QueryPlan::build_with(R::schema(), request, &self.config)?;
        let store = self.records.read();
        let docs: Vec<R> = plan.stream(store.iter()).cloned().collect();
        let page = plan.window();
        bench.finish(&[
            ("scanned", store.len()),
            ("result_count", docs.len()),
            ("skip", page.skip),
            ("take", page.take),
        ]);
        Ok(docs)
    }

    /// # Errors
    /// `QueryError::Json` for a malformed body, otherwise as [`Collection::find`].
    pub fn find_json(&self, body: &str) -> Result<Vec<R>, QueryError> {
        self.find(&parse_request_json(body)?)
    }

    /// Number of records matching the request's filters and search terms.
    ///
    /// # Errors
    /// Any plan validation error.
    pub fn count(&self, request: &QueryRequest) -> Result<usize, QueryError> {
        let bench = QueryBench::start("count", R::schema().name());
        let plan = QueryPlan::build_with(R::schema(), request, &self.config)?;
        let n = plan.count(self.records.read().iter());
        bench.finish(&[("result_count", n)]);
        Ok(n)
    }
}

impl<R: Record + Clone> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + Clone> FromIterator<R> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let col = Self::new();
        col.extend(iter);
        col
    }
}
