//! In-memory vector collections and nearest-neighbour retrieval.

pub mod retriever;
pub mod vector;
