use serde::{Deserialize, Serialize};

/// Metadata stored next to every embedded file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetadata {
    pub file_name: String,
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    pub summary: String,
}

/// A single embedded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: DocumentMetadata,
}

/// A single chat message (system, user or assistant)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outcome of embedding a repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub indexed: usize,
    pub skipped_decode: usize,
    pub skipped_io: usize,
    /// Files whose id collided with one already stored
    pub skipped_duplicate: usize,
}

impl IndexReport {
    pub fn skipped(&self) -> usize {
        self.skipped_decode + self.skipped_io + self.skipped_duplicate
    }
}
