use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::chat::ChatSession;
use crate::config::Config;
use crate::git::clone_repository;
use crate::indexer::vectorize_files;
use crate::llm::{ChatModel, Embedder};
use crate::search::vector::VectorClient;

pub const URL_PROMPT: &str = "Enter the public GitHub repository URL: ";

/// Clone, embed, then answer questions until the user leaves.
///
/// Reads the repository URL and all questions from `input`; writes prompts
/// and answers to `output`.
pub async fn run<E, C, R, W>(
    config: &Config,
    embedder: &E,
    chat: &C,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    E: Embedder,
    C: ChatModel,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(URL_PROMPT.as_bytes()).await?;
    output.flush().await?;

    let mut url = String::new();
    input
        .read_line(&mut url)
        .await
        .context("Failed to read repository URL")?;
    let url = url.trim().to_string();
    if url.is_empty() {
        anyhow::bail!("No repository URL given");
    }

    let target = config.clone_dir.clone();
    let token = config.git_token.clone();
    let cloned =
        tokio::task::spawn_blocking(move || clone_repository(&url, &target, token.as_deref()))
            .await??;

    let Some(repo_dir) = cloned else {
        let notice = format!(
            "Directory '{}' already exists. Please remove it or choose another directory.\n",
            config.clone_dir.display()
        );
        output.write_all(notice.as_bytes()).await?;
        output.flush().await?;
        return Ok(());
    };

    let vectors = VectorClient::new();
    let collection = vectors.create_collection(&config.collection_name)?;
    let report = vectorize_files(&repo_dir, config.index_git_dir, embedder, &collection).await?;
    if report.skipped() > 0 {
        tracing::info!("{} files were not embedded", report.skipped());
    }

    let collection = vectors.get_collection(&config.collection_name)?;
    ChatSession::new(&collection, embedder, chat)
        .run(input, output)
        .await
}
