use anyhow::Result;

use crate::llm::Embedder;
use crate::search::vector::Collection;

/// Number of documents handed to the chat model per question.
pub const TOP_K: usize = 5;

/// Embed `query` and return the contents of the `TOP_K` closest documents.
pub async fn query_repository<E: Embedder>(
    collection: &Collection,
    embedder: &E,
    query: &str,
) -> Result<Vec<String>> {
    let query_embedding = embedder.embed(query).await?;
    let hits = collection.query(&query_embedding, TOP_K);

    tracing::debug!(
        "Retrieved {} documents for query: {}",
        hits.len(),
        hits.iter().map(|h| h.id.as_str()).collect::<Vec<_>>().join(", ")
    );

    Ok(hits.into_iter().map(|h| h.content).collect())
}
