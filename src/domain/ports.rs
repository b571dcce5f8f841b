use crate::domain::model::{MeasureEntry, Page};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transport seam the engine drives. The concrete HTTP implementation lives
/// in the adapters layer; tests substitute in-memory fakes.
#[async_trait]
pub trait MeasureSource: Send + Sync {
    /// One page of a listing endpoint. `params` must be repeated unchanged on
    /// every page of the same walk; only `page` advances.
    async fn fetch_page(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        page: u64,
    ) -> Result<Page>;

    /// One measure search for at most `MAX_PROJECTS_PER_SEARCH` keys. Callers
    /// with larger key sets go through the batcher, never through this
    /// directly.
    async fn fetch_measures(
        &self,
        keys: &[String],
        metrics: &[String],
    ) -> Result<Vec<MeasureEntry>>;
}
