use serde::{Deserialize, Serialize};

use crate::errors::QueryError;

/// Limits and switches applied while building a query plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub max_page_size: usize,
    pub max_in_values: usize,
    /// Filters plus search terms in one request.
    pub max_conditions: usize,
    pub case_insensitive_fields: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { max_page_size: 10_000, max_in_values: 1000, max_conditions: 64, case_insensitive_fields: true }
    }
}

impl QueryConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `QueryError::Config` on malformed TOML or mistyped keys.
    pub fn from_toml_str(s: &str) -> Result<Self, QueryError> {
        Ok(toml::from_str(s)?)
    }

    /// Defaults overridden by environment variables if present:
    /// - RECORDQUERY_MAX_PAGE_SIZE
    /// - RECORDQUERY_MAX_IN_VALUES
    /// - RECORDQUERY_MAX_CONDITIONS
    /// - RECORDQUERY_CASE_INSENSITIVE_FIELDS
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|k| std::env::var(k).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let num = |k: &str| var(k).and_then(|s| s.trim().parse::<usize>().ok());
        if let Some(n) = num("RECORDQUERY_MAX_PAGE_SIZE") {
            self.max_page_size = n;
        }
        if let Some(n) = num("RECORDQUERY_MAX_IN_VALUES") {
            self.max_in_values = n;
        }
        if let Some(n) = num("RECORDQUERY_MAX_CONDITIONS") {
            self.max_conditions = n;
        }
        if let Some(s) = var("RECORDQUERY_CASE_INSENSITIVE_FIELDS") {
            self.case_insensitive_fields = matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }
}
