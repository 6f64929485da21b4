//! Search and filtering with a server-first, locally-evaluated fallback chain.

pub mod criteria;
pub mod predicate;
pub mod resilient;

pub use criteria::{
    FilterAction, FilterCriteria, FilterPayload, SortOrder, SALARY_CEILING, SALARY_FLOOR,
};
pub use predicate::{apply_filter, apply_keyword, matches_criteria, matches_keyword};
pub use resilient::{
    JobScope, QueryOutcome, QuerySource, ResilientQuery, FILTER_PATH, KEYWORD_SEARCH_PATH,
};
