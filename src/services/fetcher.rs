//! Row Fetcher
//!
//! The fetch boundary of the model. `RowFetcher` abstracts the remote search
//! endpoint; `HttpFetcher` implements it over HTTP GET with configurable
//! query parameter and response field names. Responses are validated here so
//! garbled payloads never reach the cache.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use snafu::OptionExt;

use crate::domain::config::EndpointConfig;
use crate::domain::query::{RowRange, SortSpec};
use crate::domain::record::Record;
use crate::error::{MalformedSnafu, Result};

/// One range fetch issued by the model
#[derive(Clone, Debug)]
pub struct FetchRequest {
    /// Inclusive row range to fetch
    pub range: RowRange,
    /// Ordering active when the fetch was issued
    pub sort: SortSpec,
    /// Free-text search term active when the fetch was issued
    pub search: String,
    /// Generation tag checked at resolution time to discard stale results
    pub generation: u64,
}

/// Parsed and validated fetch response
#[derive(Clone, Debug)]
pub struct FetchPage {
    /// Result rows, positioned consecutively from the requested start index.
    /// May be shorter than the requested range near the end of the result set.
    pub rows: Vec<Record>,
    /// Total row count, when the endpoint reports one
    pub total: Option<u64>,
}

/// Boundary over the remote search endpoint
pub trait RowFetcher: Send + Sync + 'static {
    /// Fetch one row range. The returned future is detached from `self` so the
    /// model can run it on the runtime bridge.
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchPage>>;
}

/// HTTP fetcher backed by reqwest
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: EndpointConfig,
}

impl HttpFetcher {
    /// Create a fetcher for the configured endpoint
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }
}

impl RowFetcher for HttpFetcher {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchPage>> {
        let client = self.client.clone();
        let config = self.config.clone();

        async move {
            let query = build_query(&config, &request);
            tracing::debug!(range = %request.range, "issuing range fetch");

            let response = client
                .get(&config.base_url)
                .query(&query)
                .send()
                .await?
                .error_for_status()?;

            let body = response.text().await?;
            let value: Value = serde_json::from_str(&body)?;
            parse_page(value, &config)
        }
        .boxed()
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

/// Build the query string pairs for a range fetch
fn build_query(config: &EndpointConfig, request: &FetchRequest) -> Vec<(String, String)> {
    let mut query = vec![
        (config.start_param.clone(), request.range.start.to_string()),
        (config.count_param.clone(), request.range.count().to_string()),
        (config.sort_field_param.clone(), request.sort.field.clone()),
        (
            config.sort_dir_param.clone(),
            request.sort.direction.as_wire().to_string(),
        ),
    ];
    if !request.search.is_empty() {
        query.push((config.search_param.clone(), request.search.clone()));
    }
    query
}

/// Validate a response body into a `FetchPage`
///
/// Fails closed on every shape mismatch; a response that fails here is never
/// partially merged.
fn parse_page(value: Value, config: &EndpointConfig) -> Result<FetchPage> {
    let object = value.as_object().context(MalformedSnafu {
        message: "response body is not a JSON object",
    })?;

    let rows_value = object.get(&config.results_field).context(MalformedSnafu {
        message: format!("response missing '{}' field", config.results_field),
    })?;
    let raw_rows = rows_value.as_array().context(MalformedSnafu {
        message: format!("'{}' field is not an array", config.results_field),
    })?;

    let rows = raw_rows
        .iter()
        .map(|row| Record::from_value(row.clone(), &config.required_fields))
        .collect::<Result<Vec<_>>>()?;

    let total = match object.get(&config.total_field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_u64().context(MalformedSnafu {
            message: format!("'{}' field is not a non-negative integer", config.total_field),
        })?),
    };

    Ok(FetchPage { rows, total })
}
