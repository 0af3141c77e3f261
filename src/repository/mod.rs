pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::models::todo::{Content, Todo};

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

/// Persistence contract for todo records. There is no update: records are
/// created or deleted, never edited.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<Todo>>;

    async fn create(&self, content: Content) -> Result<Todo>;

    /// Removes the record with `id` and returns it. Unknown ids are `Ok(None)`.
    async fn delete(&self, id: &str) -> Result<Option<Todo>>;

    async fn shutdown(&self) {}
}

pub async fn connect(config: &Config) -> Result<Arc<dyn TodoStore>> {
    match &config.store {
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store, records are lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::MongoDb(settings) => {
            let store = MongoStore::connect(settings).await?;
            Ok(Arc::new(store))
        }
    }
}
