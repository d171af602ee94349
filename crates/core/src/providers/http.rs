use async_trait::async_trait;
use reqwest::{Client, StatusCode};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::SeriesProvider;
use crate::errors::CoreError;
use crate::models::query::SeriesQuery;
use crate::models::series::SeriesPage;
use crate::models::settings::DashboardSettings;

/// JSON-over-HTTP provider for the dashboard series endpoints.
///
/// - **Request**: `GET <endpoint>?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD&type=<daily|weekly|monthly|yearly>`
/// - **Response**: `{ "data": [{ "period", "period_formatted", "total_volume", "average_ticket" }], "total_count"? }`
pub struct HttpSeriesProvider {
    client: Client,
    url: String,
}

impl HttpSeriesProvider {
    pub fn new(settings: &DashboardSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            url: settings.volume_url(),
        }
    }

    /// Endpoint URL without query string.
    pub fn endpoint(&self) -> &str {
        &self.url
    }

    /// Full request URL for `query`.
    ///
    /// Parameter values are dates and fixed keywords, so they need no escaping.
    pub fn request_url(&self, query: &SeriesQuery) -> String {
        let params: Vec<String> = query
            .to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        format!("{}?{}", self.url, params.join("&"))
    }

    /// Parse a response body.
    pub fn parse_page(body: &str) -> Result<SeriesPage, CoreError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Map a finished response to a page.
    ///
    /// Non-2xx statuses and unreadable bodies are both `CoreError::Api`
    /// tagged with this provider's endpoint. The body is ignored on failure.
    pub fn page_from_response(
        &self,
        status: StatusCode,
        body: &str,
    ) -> Result<SeriesPage, CoreError> {
        if !status.is_success() {
            warn!(endpoint = %self.url, %status, "series request failed");
            return Err(CoreError::Api {
                endpoint: self.url.clone(),
                message: format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string(),
            });
        }

        Self::parse_page(body).map_err(|e| CoreError::Api {
            endpoint: self.url.clone(),
            message: format!("Failed to parse series response: {e}"),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SeriesProvider for HttpSeriesProvider {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn fetch_series(&self, query: &SeriesQuery) -> Result<SeriesPage, CoreError> {
        let url = self.request_url(query);
        debug!(endpoint = %self.url, granularity = %query.granularity, "fetching series");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = if status.is_success() {
            resp.text().await?
        } else {
            String::new()
        };
        self.page_from_response(status, &body)
    }
}
