//! Backing store seam: a document store addressed by collection name.

use async_trait::async_trait;
use models::Document;

use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

pub use memory::MemoryDocumentStore;
pub use seaorm::SeaOrmDocumentStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append one document. Atomic per document; no uniqueness checks.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), ServiceError>;

    /// Up to `limit` documents in the store's natural order. Internal row ids are not included.
    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>, ServiceError>;

    /// Release the underlying connection. Called once at shutdown.
    async fn close(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
