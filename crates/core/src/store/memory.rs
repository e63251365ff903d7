use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde_json::{Map, Value};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::{DocumentStore, DocumentStream};
use crate::document::validate::validate_segment;
use crate::document::{DocumentPath, RawDocument};
use crate::error::StoreError;
use crate::events::{ChangeEvent, EventBus, StoreEvent};
use crate::mutation::{Mutation, MutationResult};

#[derive(Debug, Clone)]
struct StoredDocument {
    /// Insertion order, used to keep snapshots stable.
    seq: u64,
    fields: Map<String, Value>,
}

type Collections = HashMap<String, BTreeMap<String, StoredDocument>>;

/// Process-local live document store. Cloning shares the same data and feed.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
    next_seq: Arc<AtomicU64>,
    bus: EventBus,
}

impl InMemoryStore {
    pub fn new(bus: EventBus) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            next_seq: Arc::new(AtomicU64::new(0)),
            bus,
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Number of open live subscriptions across all collections.
    pub fn live_subscriptions(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Load documents without publishing change events. Existing ids are replaced.
    pub async fn seed(
        &self,
        collection: &str,
        documents: impl IntoIterator<Item = RawDocument>,
    ) -> Result<usize, StoreError> {
        validate_segment(collection)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let mut loaded = 0;
        for doc in documents {
            validate_segment(&doc.id)?;
            docs.insert(
                doc.id,
                StoredDocument {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    fields: doc.fields,
                },
            );
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Read a single document.
    pub async fn get(&self, path: &DocumentPath) -> Option<RawDocument> {
        let collections = self.collections.read().await;
        collections
            .get(path.collection())
            .and_then(|docs| docs.get(path.id()))
            .map(|doc| RawDocument::new(path.id(), doc.fields.clone()))
    }

    /// Current contents of `collection` in insertion order.
    pub async fn snapshot(&self, collection: &str) -> Vec<RawDocument> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Vec::new();
        };
        let mut ordered: Vec<_> = docs.iter().collect();
        ordered.sort_by_key(|(_, doc)| doc.seq);
        ordered
            .into_iter()
            .map(|(id, doc)| RawDocument::new(id.clone(), doc.fields.clone()))
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(EventBus::default())
    }
}

struct LiveFeed {
    store: InMemoryStore,
    collection: String,
    receiver: broadcast::Receiver<StoreEvent>,
    primed: bool,
}

impl LiveFeed {
    /// Wait for the next change to this feed's collection. `false` once the bus closes.
    async fn changed(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.collection() == self.collection => return true,
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        collection = %self.collection,
                        skipped,
                        "live feed lagged, re-reading collection"
                    );
                    return true;
                }
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn subscribe(&self, collection: &str) -> Result<DocumentStream, StoreError> {
        validate_segment(collection)?;
        // Subscribe before the first read so no change slips in between.
        let feed = LiveFeed {
            store: self.clone(),
            collection: collection.to_string(),
            receiver: self.bus.subscribe(),
            primed: false,
        };
        tracing::debug!(collection, "opened live subscription");

        let stream = stream::unfold(feed, |mut feed| async move {
            if feed.primed && !feed.changed().await {
                return None;
            }
            feed.primed = true;
            let snapshot = feed.store.snapshot(&feed.collection).await;
            Some((Ok(snapshot), feed))
        });
        Ok(stream.boxed())
    }

    async fn apply(&self, mutation: Mutation) -> Result<MutationResult, StoreError> {
        let operation = mutation.operation();
        let event = match mutation {
            Mutation::Create(create) => {
                validate_segment(&create.collection)?;
                let id = Uuid::new_v4().to_string();
                let mut collections = self.collections.write().await;
                collections.entry(create.collection.clone()).or_default().insert(
                    id.clone(),
                    StoredDocument {
                        seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                        fields: create.document,
                    },
                );
                StoreEvent::Created(ChangeEvent::now(create.collection, id))
            }
            Mutation::Patch(patch) => {
                let mut collections = self.collections.write().await;
                let doc = collections
                    .get_mut(patch.path.collection())
                    .and_then(|docs| docs.get_mut(patch.path.id()))
                    .ok_or_else(|| StoreError::NotFound(patch.path.to_string()))?;
                doc.fields.extend(patch.set);
                StoreEvent::Updated(ChangeEvent::now(patch.path.collection(), patch.path.id()))
            }
            Mutation::Delete(delete) => {
                let mut collections = self.collections.write().await;
                let removed = collections
                    .get_mut(delete.path.collection())
                    .and_then(|docs| docs.remove(delete.path.id()));
                if removed.is_none() {
                    tracing::debug!(path = %delete.path, "delete of missing document ignored");
                    return Ok(MutationResult {
                        id: delete.path.id().to_string(),
                        operation,
                    });
                }
                StoreEvent::Deleted(ChangeEvent::now(delete.path.collection(), delete.path.id()))
            }
        };

        let id = event.change().document_id.clone();
        let receivers = self.bus.publish(event);
        tracing::debug!(%id, ?operation, receivers, "applied mutation");
        Ok(MutationResult { id, operation })
    }
}
