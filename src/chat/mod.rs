//! Interactive question-answering over an indexed repository.

mod session;

pub use session::{ChatSession, QUESTION_PROMPT};

use crate::models::ChatMessage;

/// Separator placed between retrieved documents in the context block.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// Join retrieved documents into one context string.
pub fn build_context(documents: &[String]) -> String {
    documents.join(CONTEXT_SEPARATOR)
}

/// Fixed instructions wrapped around the retrieved code.
pub fn build_system_prompt(context: &str) -> String {
    format!(
        "You are an assistant that helps answer questions about a code repository. \
         Use the following code snippets to answer the user's question. The code \
         context is provided below:\n\n\
         {context}\n\n\
         Now, answer the user's question based on the code."
    )
}

/// The two messages sent for every question: instructions plus context, then the raw question.
pub fn build_messages(documents: &[String], question: &str) -> Vec<ChatMessage> {
    let context = build_context(documents);
    vec![
        ChatMessage::system(build_system_prompt(&context)),
        ChatMessage::user(question),
    ]
}
