use crate::domain::model::{MeasureEntry, MAX_PROJECTS_PER_SEARCH};
use crate::domain::ports::MeasureSource;
use crate::utils::error::Result;

/// Contiguous, order-preserving chunks of at most `max_batch` keys. The last
/// chunk may be shorter.
pub fn chunk_keys(keys: &[String], max_batch: usize) -> Vec<Vec<String>> {
    keys.chunks(max_batch.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Fetches measures for any number of keys by splitting them under the
/// server's per-request limit and concatenating the raw entries in batch
/// order. Entries keep their server order within each batch; nothing is
/// deduplicated.
pub async fn fetch_measures_batched<T: MeasureSource>(
    transport: &T,
    keys: &[String],
    metrics: &[String],
) -> Result<Vec<MeasureEntry>> {
    let mut entries = Vec::new();

    for batch in chunk_keys(keys, MAX_PROJECTS_PER_SEARCH) {
        tracing::debug!("fetching measures for {} projects", batch.len());
        let mut batch_entries = transport.fetch_measures(&batch, metrics).await?;
        entries.append(&mut batch_entries);
    }

    Ok(entries)
}
