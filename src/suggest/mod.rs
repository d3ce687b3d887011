//! # Title Suggestions
//!
//! A text-suggestion service proposes a short footer label from the card
//! content. It is invoked only on explicit request; callers treat any
//! failure as "no suggestion" and keep the existing title.

mod gemini;

pub use gemini::{DEFAULT_MODEL, GeminiSuggester};

use async_trait::async_trait;

use crate::StudioError;

/// Prompt sent with the card content.
pub const PROMPT: &str = "Suggest a short, catchy label (maximum 4 words) for a QR code \
that links to the following content. Reply with the label only, no quotes or punctuation \
around it.";

/// Something that can suggest a label for a piece of text.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Return a short label for `input`.
    async fn suggest(&self, input: &str) -> Result<String, StudioError>;
}

const QUOTES: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('`', '`')];

/// Trim whitespace and one layer of surrounding quotes from a reply.
pub fn clean_suggestion(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let unquoted = QUOTES
        .iter()
        .find_map(|&(open, close)| trimmed.strip_prefix(open)?.strip_suffix(close))
        .unwrap_or(trimmed)
        .trim();
    let first_line = unquoted.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        None
    } else {
        Some(first_line.to_string())
    }
}
