//! Feedback storage
//!
//! The analysis engine never touches storage; handlers read the history
//! snapshot through [`FeedbackStore`] and persist the analyzed item after.

use async_trait::async_trait;
use chrono::Utc;
use feedtriage_core::{FeedbackItem, FeedbackUpdate, Result};
use parking_lot::RwLock;
use std::path::Path;
use tracing::info;

/// Append/read collaborator for stored feedback
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Every stored item, in insertion order
    async fn list(&self) -> Result<Vec<FeedbackItem>>;

    async fn get(&self, id: &str) -> Result<Option<FeedbackItem>>;

    async fn insert(&self, item: FeedbackItem) -> Result<FeedbackItem>;

    /// Apply a manual edit; `None` when the id is unknown
    async fn update(&self, id: &str, update: FeedbackUpdate) -> Result<Option<FeedbackItem>>;

    /// `false` when the id is unknown
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    items: RwLock<Vec<FeedbackItem>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<FeedbackItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Seed from a JSON array of stored feedback items
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let items: Vec<FeedbackItem> = serde_json::from_str(&content)?;
        info!("Seeded {} feedback items from {}", items.len(), path.display());
        Ok(Self::from_items(items))
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<FeedbackItem>> {
        Ok(self.items.read().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<FeedbackItem>> {
        Ok(self.items.read().iter().find(|item| item.id == id).cloned())
    }

    async fn insert(&self, item: FeedbackItem) -> Result<FeedbackItem> {
        let mut items = self.items.write();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(feedtriage_core::Error::storage(format!(
                "feedback {} already exists",
                item.id
            )));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, update: FeedbackUpdate) -> Result<Option<FeedbackItem>> {
        let mut items = self.items.write();
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            update.apply(item, Utc::now());
            item.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }
}
