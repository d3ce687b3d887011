//! Gemini-backed suggestions via the `generateContent` REST endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{PROMPT, SuggestionService, clean_suggestion};
use crate::StudioError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Suggestion service backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    client: reqwest::Client,
    key: String,
    model: String,
    base_url: String,
}

impl GeminiSuggester {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            key: key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model;
        }
        self
    }

    /// Point at a different API root (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl SuggestionService for GeminiSuggester {
    async fn suggest(&self, input: &str) -> Result<String, StudioError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("{}\n\n{}", PROMPT, input) }]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::Suggestion(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(StudioError::Suggestion(format!(
                "Gemini API error ({}): {}",
                status,
                extract_error(&text).unwrap_or(text)
            )));
        }

        extract_text(&text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the first non-empty text part out of a response body.
fn extract_text(body: &str) -> Result<String, StudioError> {
    let payload: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| StudioError::Suggestion(format!("Failed to parse Gemini response: {}", e)))?;

    payload
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .find_map(clean_suggestion)
        .ok_or_else(|| StudioError::Suggestion("No suggestion returned".to_string()))
}

fn extract_error(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error.message)
}
