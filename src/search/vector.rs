use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{Document, DocumentMetadata};

/// In-memory named collection with cosine similarity search.
#[derive(Debug)]
pub struct Collection {
    name: String,
    entries: RwLock<Vec<Document>>,
}

#[derive(Debug, Clone)]
pub struct VectorHit {
    pub id: String,
    pub content: String,
    pub metadata: DocumentMetadata,
    pub score: f32,
}

impl Collection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a document. Ids must be unique within the collection.
    pub fn add(&self, document: Document) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.iter().any(|e| e.id == document.id) {
            anyhow::bail!(
                "Document id '{}' already exists in collection '{}'",
                document.id,
                self.name
            );
        }
        entries.push(document);
        Ok(())
    }

    /// Return the `limit` documents closest to `query_embedding`, best first.
    pub fn query(&self, query_embedding: &[f32], limit: usize) -> Vec<VectorHit> {
        let entries = self.entries.read();

        let mut scored: Vec<(f32, &Document)> = entries
            .iter()
            .map(|e| (cosine_similarity(query_embedding, &e.embedding), e))
            .collect();

        // Stable sort keeps insertion order between equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(score, e)| VectorHit {
                id: e.id.clone(),
                content: e.content.clone(),
                metadata: e.metadata.clone(),
                score,
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Document> {
        self.entries.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().iter().any(|e| e.id == id)
    }

    pub fn count(&self) -> usize {
        self.entries.read().len()
    }
}

/// Owner of named collections for the lifetime of one program run.
#[derive(Default)]
pub struct VectorClient {
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl VectorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new, empty collection. Fails if the name is taken.
    pub fn create_collection(&self, name: &str) -> Result<Arc<Collection>> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            anyhow::bail!("Collection '{name}' already exists");
        }
        let collection = Arc::new(Collection::new(name));
        collections.insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    pub fn get_collection(&self, name: &str) -> Result<Arc<Collection>> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Collection '{name}' does not exist"))
    }

}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, embedding: Vec<f32>) -> Document {
        Document {
            id: id.to_string(),
            content: format!("content of {id}"),
            embedding,
            metadata: DocumentMetadata {
                file_name: id.to_string(),
                path: id.to_string(),
                summary: format!("content of {id}..."),
            },
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let score = cosine_similarity(&[0.3, 0.4], &[0.3, 0.4]);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_mismatched_or_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_query_orders_by_similarity() {
        let collection = Collection::new("t");
        collection.add(doc("main.rs", vec![0.1, 0.2, 0.9])).unwrap();
        collection.add(doc("db.rs", vec![0.9, 0.1, 0.1])).unwrap();
        collection.add(doc("handlers.rs", vec![0.2, 0.8, 0.3])).unwrap();

        let hits = collection.query(&[0.95, 0.05, 0.05], 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, "db.rs");
        assert!(hits[0].score >= hits[1].score);
        assert!(hits[1].score >= hits[2].score);
    }

    #[test]
    fn test_query_truncates_to_limit() {
        let collection = Collection::new("t");
        for i in 0..8 {
            collection.add(doc(&format!("f{i}"), vec![1.0, i as f32])).unwrap();
        }
        assert_eq!(collection.query(&[1.0, 0.0], 5).len(), 5);
    }

    #[test]
    fn test_query_empty_collection() {
        let collection = Collection::new("t");
        assert!(collection.query(&[1.0, 0.0], 5).is_empty());
    }

    #[test]
    fn test_equal_scores_keep_insertion_order() {
        let collection = Collection::new("t");
        collection.add(doc("first", vec![1.0, 0.0])).unwrap();
        collection.add(doc("second", vec![2.0, 0.0])).unwrap();

        let hits = collection.query(&[1.0, 0.0], 5);
        assert_eq!(hits[0].id, "first");
        assert_eq!(hits[1].id, "second");
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let collection = Collection::new("t");
        collection.add(doc("a.py", vec![1.0])).unwrap();
        let err = collection.add(doc("a.py", vec![0.5])).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(collection.count(), 1);
    }

    #[test]
    fn test_get_returns_stored_document() {
        let collection = Collection::new("t");
        collection.add(doc("a.py", vec![1.0])).unwrap();
        assert_eq!(collection.get("a.py").unwrap().content, "content of a.py");
        assert!(collection.get("b.py").is_none());
        assert!(collection.contains("a.py"));
        assert!(!collection.contains("b.py"));
    }

    #[test]
    fn test_client_create_then_get_shares_collection() {
        let client = VectorClient::new();
        let created = client.create_collection("repo_files").unwrap();
        created.add(doc("a.py", vec![1.0])).unwrap();

        let fetched = client.get_collection("repo_files").unwrap();
        assert_eq!(fetched.name(), "repo_files");
        assert_eq!(fetched.count(), 1);
    }

    #[test]
    fn test_client_create_twice_fails() {
        let client = VectorClient::new();
        client.create_collection("repo_files").unwrap();
        assert!(client.create_collection("repo_files").is_err());
    }

    #[test]
    fn test_client_get_missing_fails() {
        let client = VectorClient::new();
        let err = client.get_collection("nope").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
