use std::collections::HashMap;

use async_trait::async_trait;
use models::Document;
use tokio::sync::RwLock;

use super::DocumentStore;
use crate::errors::ServiceError;

/// Process-local document store. Natural order is insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        let map = self.collections.read().await;
        map.get(collection).map_or(0, Vec::len)
    }

    /// Raw stored documents, uncapped.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        let map = self.collections.read().await;
        map.get(collection).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), ServiceError> {
        let mut map = self.collections.write().await;
        map.entry(collection.to_string()).or_default().push(doc);
        Ok(())
    }

    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>, ServiceError> {
        let map = self.collections.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(map
            .get(collection)
            .map(|docs| docs.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
