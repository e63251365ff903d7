use std::path::Path;

use anyhow::Context;
use video_desk_core::{InMemoryStore, RawDocument};

/// Load a JSON array of `{ "id": ..., ...fields }` documents into `collection`.
pub async fn load_seed_file(store: &InMemoryStore, collection: &str, path: &Path) -> anyhow::Result<usize> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let documents: Vec<RawDocument> = serde_json::from_str(&text)
        .with_context(|| format!("seed file {} is not a JSON array of documents", path.display()))?;
    let loaded = store
        .seed(collection, documents)
        .await
        .with_context(|| format!("failed to seed collection {collection}"))?;
    Ok(loaded)
}
