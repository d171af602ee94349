use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::query::SeriesQuery;
use crate::models::series::SeriesPage;

/// Source of already-aggregated series rows.
///
/// The backend owns aggregation, pagination and ordering; a provider only
/// moves one page of rows per query. Swapping HTTP for a fixture or a
/// different transport touches nothing else.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SeriesProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the rows for one query.
    async fn fetch_series(&self, query: &SeriesQuery) -> Result<SeriesPage, CoreError>;
}
