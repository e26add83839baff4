//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{AiError, TextGenerator};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, joined.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("emporio-storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        })
    }

    /// Points the client at another host (local stubs in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        match res.status() {
            s if s.is_success() => {
                let body = res
                    .json::<GenerateResponse>()
                    .await
                    .map_err(|e| AiError::Serde(e.to_string()))?;
                body.text().ok_or(AiError::EmptyResponse)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::warn!(model = %self.model, "Gemini rejected the API key");
                Err(AiError::Http {
                    status: res.status().as_u16(),
                    body: "invalid api key".to_string(),
                })
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(AiError::Http { status, body })
            }
        }
    }
}
