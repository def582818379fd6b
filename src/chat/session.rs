use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::chat::build_messages;
use crate::llm::{ChatModel, Embedder};
use crate::search::retriever::query_repository;
use crate::search::vector::Collection;

pub const QUESTION_PROMPT: &str =
    "Ask a question about the code repository (or type 'exit' to quit): ";
const NO_DOCUMENTS: &str = "No relevant documents found in the repository.";

/// A read-eval loop answering questions about one collection.
///
/// Every turn stands alone: the chat model only sees the documents retrieved
/// for the current question.
pub struct ChatSession<'a, E, C> {
    collection: &'a Collection,
    embedder: &'a E,
    chat: &'a C,
}

impl<'a, E: Embedder, C: ChatModel> ChatSession<'a, E, C> {
    pub fn new(collection: &'a Collection, embedder: &'a E, chat: &'a C) -> Self {
        Self {
            collection,
            embedder,
            chat,
        }
    }

    /// Answer one question. Returns `None` when retrieval found nothing, in
    /// which case the chat model is not called.
    pub async fn ask(&self, question: &str) -> Result<Option<String>> {
        let documents = query_repository(self.collection, self.embedder, question).await?;
        if documents.is_empty() {
            return Ok(None);
        }

        let messages = build_messages(&documents, question);
        let reply = self.chat.complete(&messages).await?;
        Ok(Some(reply))
    }

    /// Prompt, read and answer until `exit` or end of input.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();
        loop {
            output.write_all(QUESTION_PROMPT.as_bytes()).await?;
            output.flush().await?;

            line.clear();
            let read = input
                .read_line(&mut line)
                .await
                .context("Failed to read question")?;
            if read == 0 {
                tracing::debug!("End of input, leaving chat loop");
                break;
            }

            // Only the line terminator is stripped; "  exit  " is a question
            let question = line.trim_end_matches(['\r', '\n']);
            if question.to_lowercase() == "exit" {
                break;
            }
            if question.trim().is_empty() {
                continue;
            }

            match self.ask(question).await? {
                Some(reply) => {
                    output
                        .write_all(format!("Answer:\n{reply}\n\n").as_bytes())
                        .await?;
                }
                None => {
                    output.write_all(format!("{NO_DOCUMENTS}\n").as_bytes()).await?;
                }
            }
        }

        output.flush().await?;
        Ok(())
    }
}
