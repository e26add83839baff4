//! # AI Text Flows
//!
//! Call-outs to a generative text service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SeoOptimizer ──► dyn TextGenerator ──► GeminiClient ──► generateContent │
//! │       │                                                                 │
//! │       └── any AiError / unusable reply ──► SeoMarkup::fallback()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recommendations do not go through here: they are served by the catalog
//! service directly.

pub mod gemini;
pub mod seo;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;
pub use seo::SeoOptimizer;

/// Errors from the text service.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("text generation is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Transport(String),

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("json error: {0}")]
    Serde(String),
}

/// A single prompt in, a single text reply out.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}
