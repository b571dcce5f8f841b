use crate::domain::ports::MeasureSource;
use crate::utils::error::Result;
use serde_json::Value;

/// Walks an offset/page-size listing endpoint until the server reports no
/// more items. Non-restartable: once exhausted it keeps answering `None`.
pub struct Paginator<'a, T: MeasureSource> {
    transport: &'a T,
    endpoint: String,
    params: Vec<(String, String)>,
    next_page: u64,
    exhausted: bool,
}

impl<'a, T: MeasureSource> Paginator<'a, T> {
    pub fn new(transport: &'a T, endpoint: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            params,
            next_page: 1,
            exhausted: false,
        }
    }

    /// Fetches the next page of items, or `None` once the listing is
    /// exhausted. A transport error aborts the walk; nothing partial is
    /// handed out.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Value>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .transport
            .fetch_page(&self.endpoint, &self.params, self.next_page)
            .await?;
        self.next_page = page.paging.page_index + 1;

        // An empty page also ends the walk: a server reporting more items
        // than it ever returns must not keep this loop alive.
        if page.paging.is_last_page() || page.items.is_empty() {
            self.exhausted = true;
        }

        Ok(Some(page.items))
    }

    /// Drains the whole listing into memory.
    pub async fn collect_all(mut self) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }
}
