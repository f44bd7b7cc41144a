use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{ImageId, ProcessedImage};

/// Trait for holding processed images until the user discards them
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Add a result, replacing any earlier result with the same id
    async fn insert(&self, image: ProcessedImage);

    /// Find a result by id
    async fn get(&self, id: &ImageId) -> Option<ProcessedImage>;

    /// Discard a result, returning it if it was present
    async fn remove(&self, id: &ImageId) -> Option<ProcessedImage>;

    /// All results in insertion order
    async fn list(&self) -> Vec<ProcessedImage>;

    /// Discard everything
    async fn clear(&self);
}

/// In-memory session, gone when the process exits
pub struct InMemorySession {
    images: Arc<RwLock<Vec<ProcessedImage>>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self {
            images: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySession {
    async fn insert(&self, image: ProcessedImage) {
        let mut images = self.images.write().await;
        match images.iter_mut().find(|existing| existing.id == image.id) {
            Some(existing) => *existing = image,
            None => images.push(image),
        }
    }

    async fn get(&self, id: &ImageId) -> Option<ProcessedImage> {
        let images = self.images.read().await;
        images.iter().find(|image| &image.id == id).cloned()
    }

    async fn remove(&self, id: &ImageId) -> Option<ProcessedImage> {
        let mut images = self.images.write().await;
        let position = images.iter().position(|image| &image.id == id)?;
        Some(images.remove(position))
    }

    async fn list(&self) -> Vec<ProcessedImage> {
        self.images.read().await.clone()
    }

    async fn clear(&self) {
        self.images.write().await.clear();
    }
}
