//! Config - Endpoint and Model Configuration

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUFFER_PAGES, DEFAULT_COUNT_PARAM, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_PAGE_SIZE,
    DEFAULT_RESULTS_FIELD, DEFAULT_SEARCH_PARAM, DEFAULT_SORT_DIR_PARAM, DEFAULT_SORT_FIELD_PARAM,
    DEFAULT_START_PARAM, DEFAULT_TOTAL_FIELD,
};

/// Search endpoint configuration
///
/// Query parameter and response field names vary per deployment, so all of
/// them are configurable rather than hard-coded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the search endpoint
    pub base_url: String,
    /// Query parameter carrying the zero-based start offset
    pub start_param: String,
    /// Query parameter carrying the row count
    pub count_param: String,
    /// Query parameter carrying the sort field name
    pub sort_field_param: String,
    /// Query parameter carrying the sort direction (1 or -1)
    pub sort_dir_param: String,
    /// Query parameter carrying the free-text search term
    pub search_param: String,
    /// Response field holding the result rows
    pub results_field: String,
    /// Response field holding the total row count (optional in responses)
    pub total_field: String,
    /// Fields every result row must carry; a row missing one is malformed
    pub required_fields: Vec<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/search".to_string(),
            start_param: DEFAULT_START_PARAM.to_string(),
            count_param: DEFAULT_COUNT_PARAM.to_string(),
            sort_field_param: DEFAULT_SORT_FIELD_PARAM.to_string(),
            sort_dir_param: DEFAULT_SORT_DIR_PARAM.to_string(),
            search_param: DEFAULT_SEARCH_PARAM.to_string(),
            results_field: DEFAULT_RESULTS_FIELD.to_string(),
            total_field: DEFAULT_TOTAL_FIELD.to_string(),
            required_fields: Vec::new(),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

/// Windowing configuration for the remote model
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Rows per logical page
    pub page_size: u64,
    /// Pages of padding fetched before and after a missing span
    pub buffer_pages: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            buffer_pages: DEFAULT_BUFFER_PAGES,
        }
    }
}
