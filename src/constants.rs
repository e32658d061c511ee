//! Model Constants
//!
//! Centralized defaults for the remote model and its endpoint contract.

/// Rows fetched per logical page
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Pages of padding added before and after a missing span
pub const DEFAULT_BUFFER_PAGES: u64 = 1;

/// Per-request HTTP timeout
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default query parameter names for the search endpoint
pub const DEFAULT_START_PARAM: &str = "start";
pub const DEFAULT_COUNT_PARAM: &str = "count";
pub const DEFAULT_SORT_FIELD_PARAM: &str = "sortField";
pub const DEFAULT_SORT_DIR_PARAM: &str = "sortDir";
pub const DEFAULT_SEARCH_PARAM: &str = "q";

/// Default response field names
pub const DEFAULT_RESULTS_FIELD: &str = "results";
pub const DEFAULT_TOTAL_FIELD: &str = "total";
