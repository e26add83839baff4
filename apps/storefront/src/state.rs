//! Shared handler state.

use std::sync::Arc;

use emporio_core::contact::WhatsAppComposer;
use emporio_db::CatalogService;

use crate::ai::SeoOptimizer;

/// Everything a handler can reach. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub whatsapp: WhatsAppComposer,
    pub seo: Arc<SeoOptimizer>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        AppState {
            catalog,
            whatsapp: WhatsAppComposer::default(),
            seo: Arc::new(SeoOptimizer::disabled()),
        }
    }

    pub fn with_whatsapp(mut self, whatsapp: WhatsAppComposer) -> Self {
        self.whatsapp = whatsapp;
        self
    }

    pub fn with_seo(mut self, seo: SeoOptimizer) -> Self {
        self.seo = Arc::new(seo);
        self
    }
}
