//! The document-store capability the gateway is written against.

pub mod memory;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::document::RawDocument;
use crate::error::StoreError;
use crate::mutation::{Mutation, MutationResult};

pub use memory::InMemoryStore;

/// Live sequence of complete collection snapshots. Ends only when dropped.
pub type DocumentStream = BoxStream<'static, Result<Vec<RawDocument>, StoreError>>;

/// Schema-less document collections with live reads and per-document writes.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Open a live subscription to `collection`. The current contents are
    /// emitted first, then a fresh snapshot after every change. Dropping the
    /// stream releases the subscription.
    fn subscribe(&self, collection: &str) -> Result<DocumentStream, StoreError>;

    /// Apply a single write.
    async fn apply(&self, mutation: Mutation) -> Result<MutationResult, StoreError>;
}
