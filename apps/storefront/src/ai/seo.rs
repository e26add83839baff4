//! SEO optimizer: prompt, generate, parse, or fall back.

use std::sync::Arc;

use emporio_core::seo::{build_prompt, parse_generated, SeoMarkup, SeoRequest};
use tracing::{debug, warn};

use super::{AiError, TextGenerator};

/// Produces SEO markup for a page. Never fails.
#[derive(Debug, Clone, Default)]
pub struct SeoOptimizer {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SeoOptimizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        SeoOptimizer {
            generator: Some(generator),
        }
    }

    /// An optimizer that always answers with the fallback markup.
    pub fn disabled() -> Self {
        SeoOptimizer { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn optimize(&self, request: &SeoRequest) -> SeoMarkup {
        match self.try_optimize(request).await {
            Ok(markup) => markup,
            Err(reason) => {
                warn!(keyword = %request.keyword, %reason, "SEO generation failed, using fallback");
                SeoMarkup::fallback(&request.keyword)
            }
        }
    }

    async fn try_optimize(&self, request: &SeoRequest) -> Result<SeoMarkup, String> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AiError::NotConfigured.to_string())?;

        let reply = generator
            .generate(&build_prompt(request))
            .await
            .map_err(|e| e.to_string())?;
        debug!(bytes = reply.len(), "SEO reply received");

        parse_generated(&reply).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FakeGenerator {
        reply: Result<String, AiError>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        fn new(reply: Result<String, AiError>) -> Arc<Self> {
            Arc::new(FakeGenerator {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, AiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn request() -> SeoRequest {
        SeoRequest {
            website_content: "<h1>Castanhas a granel</h1>".to_string(),
            keyword: "castanhas".to_string(),
        }
    }

    #[tokio::test]
    async fn test_uses_generated_markup() {
        let fake = FakeGenerator::new(Ok(
            "<title>Castanhas | Loja</title>\n<meta name=\"description\" content=\"As melhores castanhas\">"
                .to_string(),
        ));
        let optimizer = SeoOptimizer::new(fake.clone());

        let markup = optimizer.optimize(&request()).await;
        assert_eq!(markup.tags().title.as_deref(), Some("Castanhas | Loja"));
        assert_ne!(markup, SeoMarkup::fallback("castanhas"));

        let prompts = fake.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Castanhas a granel"));
        assert!(prompts[0].contains("castanhas"));
    }

    #[tokio::test]
    async fn test_falls_back_on_error() {
        let optimizer = SeoOptimizer::new(FakeGenerator::new(Err(AiError::Http {
            status: 503,
            body: "unavailable".to_string(),
        })));
        assert_eq!(
            optimizer.optimize(&request()).await,
            SeoMarkup::fallback("castanhas")
        );
    }

    #[tokio::test]
    async fn test_falls_back_on_unusable_reply() {
        let optimizer = SeoOptimizer::new(FakeGenerator::new(Ok("sem marcação".to_string())));
        assert_eq!(
            optimizer.optimize(&request()).await,
            SeoMarkup::fallback("castanhas")
        );
    }

    #[tokio::test]
    async fn test_disabled_optimizer_falls_back() {
        let optimizer = SeoOptimizer::disabled();
        assert!(!optimizer.is_enabled());
        assert_eq!(
            optimizer.optimize(&request()).await,
            SeoMarkup::fallback("castanhas")
        );
    }
}
