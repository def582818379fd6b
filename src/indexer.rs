use anyhow::Result;
use std::path::Path;

use crate::git::{walk_repo_files, FileRead, RepoFile};
use crate::llm::Embedder;
use crate::models::{Document, DocumentMetadata, IndexReport};
use crate::search::vector::Collection;

/// Characters of content kept in a document summary.
pub const SUMMARY_CHARS: usize = 50;

/// Embed every readable text file under `repo_dir` into `collection`.
///
/// Unreadable and non-UTF-8 files are skipped, as are files whose id is
/// already taken (distinct non-UTF-8 names can map to the same id). Any
/// embedding failure aborts the run.
pub async fn vectorize_files<E: Embedder>(
    repo_dir: &Path,
    include_git_dir: bool,
    embedder: &E,
    collection: &Collection,
) -> Result<IndexReport> {
    let mut report = IndexReport::default();

    for read in walk_repo_files(repo_dir, include_git_dir) {
        let file = match read {
            FileRead::Text(file) => file,
            FileRead::NotUtf8(path) => {
                tracing::warn!("Skipping file {} due to encoding error.", path.display());
                report.skipped_decode += 1;
                continue;
            }
            FileRead::Unreadable(path, e) => {
                tracing::warn!("Error reading {}: {e}", path.display());
                report.skipped_io += 1;
                continue;
            }
        };

        if collection.contains(&file.relative_path) {
            tracing::warn!(
                "Skipping {}: id '{}' is already taken",
                file.path.display(),
                file.relative_path
            );
            report.skipped_duplicate += 1;
            continue;
        }

        let embedding = embedder.embed(&file.content).await?;
        collection.add(build_document(file, embedding))?;
        report.indexed += 1;
    }

    tracing::info!(
        "Files vectorized and stored in collection '{}' ({} indexed, {} skipped)",
        collection.name(),
        report.indexed,
        report.skipped()
    );

    Ok(report)
}

fn build_document(file: RepoFile, embedding: Vec<f32>) -> Document {
    let summary = summarize(&file.content);
    Document {
        id: file.relative_path.clone(),
        metadata: DocumentMetadata {
            file_name: file.file_name,
            path: file.relative_path,
            summary,
        },
        content: file.content,
        embedding,
    }
}

/// First `SUMMARY_CHARS` characters followed by `...`.
///
/// The ellipsis is appended even when nothing was cut off.
pub fn summarize(content: &str) -> String {
    let mut summary: String = content.chars().take(SUMMARY_CHARS).collect();
    summary.push_str("...");
    summary
}
