//! # Category Cache
//!
//! Holds the category list between requests.
//!
//! ```text
//! get() ──► entry present and age < ttl ? ──yes──► Some(categories)
//!                     │
//!                     no
//!                     ▼
//!                   None  ──► caller queries the store ──► put(categories)
//! ```
//!
//! A TTL of zero disables caching. `invalidate()` drops the entry at once.

use emporio_core::Category;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct Entry {
    categories: Vec<Category>,
    stored_at: Instant,
}

/// TTL cache for the category list.
#[derive(Debug)]
pub struct CategoryCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entry: RwLock<Option<Entry>>,
}

impl CategoryCache {
    pub fn new(ttl: Duration) -> Self {
        CategoryCache::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        CategoryCache {
            ttl,
            clock,
            entry: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cached categories, if present and fresh.
    pub async fn get(&self) -> Option<Vec<Category>> {
        if !self.is_enabled() {
            return None;
        }
        let guard = self.entry.read().await;
        let entry = guard.as_ref()?;
        let age = self.clock.now().saturating_duration_since(entry.stored_at);
        if age < self.ttl {
            debug!(?age, "Category cache hit");
            Some(entry.categories.clone())
        } else {
            debug!(?age, "Category cache entry expired");
            None
        }
    }

    pub async fn put(&self, categories: Vec<Category>) {
        if !self.is_enabled() {
            return;
        }
        *self.entry.write().await = Some(Entry {
            categories,
            stored_at: self.clock.now(),
        });
    }

    pub async fn invalidate(&self) {
        debug!("Category cache invalidated");
        *self.entry.write().await = None;
    }
}

impl Default for CategoryCache {
    /// Five minutes.
    fn default() -> Self {
        CategoryCache::new(Duration::from_secs(300))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
