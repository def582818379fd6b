//! # repo-chat
//!
//! Clone a git repository, embed every text file into an in-memory vector
//! collection, and answer questions about the code with a hosted chat model.
//!
//! ## Pipeline
//!
//! ```text
//!   repository URL
//!         │
//!         ▼
//!   ┌──────────────┐   refuses to overwrite an existing directory
//!   │  git clone   │
//!   └──────┬───────┘
//!          │ working directory
//!          ▼
//!   ┌──────────────┐   one embedding per UTF-8 file,
//!   │ embed files  │   unreadable / binary files skipped
//!   └──────┬───────┘
//!          │ collection "repo_files"
//!          ▼
//!   ┌──────────────┐   question ──► embed ──► top 5 by cosine
//!   │  chat loop   │   context + question ──► chat model ──► answer
//!   └──────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for clone target and LLM settings
//! - [`models`] - Shared data types: `Document`, `ChatMessage`, `IndexReport`
//! - [`git`] - Git clone and UTF-8 file walking
//! - [`llm`] - Embedding and chat completion calls (Ollama or OpenAI-compatible)
//! - [`search::vector`] - Named in-memory collections with cosine similarity search
//! - [`search::retriever`] - Query embedding plus top-5 lookup
//! - [`indexer`] - Embeds a cloned repository into a collection
//! - [`chat`] - Prompt assembly and the interactive question loop
//! - [`app`] - Wires the stages together for one program run

pub mod app;
pub mod chat;
pub mod config;
pub mod git;
pub mod indexer;
pub mod llm;
pub mod models;
pub mod search;
