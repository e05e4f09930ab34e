// Submodules for separation of concerns
mod eval;
mod exec;
mod parse;
mod plan;
mod types;

// Public API re-exports
pub use eval::{Predicate, SortKey};
pub use exec::{apply_query, count_matching};
pub use parse::{parse_request_json, parse_request_value};
pub use plan::QueryPlan;
pub use types::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, FilterCondition, Operator, Page, QueryRequest,
    SortDirection,
};
