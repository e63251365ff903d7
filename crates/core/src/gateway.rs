//! Store gateway: the typed face of the `videos` collection.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, BoxStream};
use futures::{future, StreamExt};

use crate::document::model::to_fields;
use crate::document::{
    normalize, DocumentPath, NewVideo, RawDocument, StoreTimestamp, VideoPatch, VideoRecord,
};
use crate::error::GatewayError;
use crate::mutation::Mutation;
use crate::store::DocumentStore;

pub const VIDEO_COLLECTION: &str = "videos";

/// Live stream of normalized collection snapshots.
pub type RecordStream = BoxStream<'static, Result<Vec<VideoRecord>, GatewayError>>;

/// Source of "now" for mutation stamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Issues strictly increasing stamps even if the clock stalls or steps back.
struct Stamper {
    clock: Arc<dyn Clock>,
    last: Mutex<Option<DateTime<Utc>>>,
}

impl Stamper {
    fn stamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let stamp = match *last {
            Some(prev) if now <= prev => prev + Duration::nanoseconds(1),
            _ => now,
        };
        *last = Some(stamp);
        stamp
    }
}

pub struct VideoGateway<S> {
    store: S,
    collection: String,
    stamper: Stamper,
}

impl<S: DocumentStore> VideoGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_collection(store, VIDEO_COLLECTION)
    }

    pub fn with_collection(store: S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            stamper: Stamper {
                clock: Arc::new(SystemClock),
                last: Mutex::new(None),
            },
        }
    }

    /// Replace the clock used for `createdAt`/`updatedAt` stamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.stamper.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Subscribe to the collection. Each emission is the complete current
    /// list. A store failure is reported once as [`GatewayError::Fetch`] and
    /// ends the stream.
    pub fn get_all(&self) -> RecordStream {
        let collection = self.collection.clone();
        let feed = match self.store.subscribe(&collection) {
            Ok(feed) => feed,
            Err(err) => {
                tracing::error!(%collection, error = %err, "failed to open live subscription");
                return stream::once(future::ready(Err(GatewayError::Fetch))).boxed();
            }
        };

        feed.scan(false, move |failed, snapshot| {
            if *failed {
                return future::ready(None);
            }
            let item = match snapshot {
                Ok(docs) => {
                    tracing::debug!(%collection, count = docs.len(), "received snapshot");
                    Ok(docs.iter().map(normalize).collect())
                }
                Err(err) => {
                    *failed = true;
                    tracing::error!(%collection, error = %err, "live subscription failed");
                    Err(GatewayError::Fetch)
                }
            };
            future::ready(Some(item))
        })
        .boxed()
    }

    /// Persist a new record. Both timestamps get the same stamp; the store
    /// assigns the id. Returns the record as the live stream will present it.
    pub async fn create(&self, video: NewVideo) -> Result<VideoRecord, GatewayError> {
        let mut fields = to_fields(&video).map_err(|err| {
            tracing::error!(error = %err, "failed to encode new record");
            GatewayError::Create
        })?;
        let stamp = StoreTimestamp::from_datetime(self.stamper.stamp()).to_value();
        fields.insert("createdAt".to_string(), stamp.clone());
        fields.insert("updatedAt".to_string(), stamp);

        let result = self
            .store
            .apply(Mutation::create(self.collection.clone(), fields.clone()))
            .await
            .map_err(|err| {
                tracing::error!(collection = %self.collection, error = %err, "failed to add record");
                GatewayError::Create
            })?;

        tracing::info!(id = %result.id, "record created");
        Ok(normalize(&RawDocument::new(result.id, fields)))
    }

    /// Write only the supplied fields plus a fresh `updatedAt`, which is returned.
    /// An unknown id is a failure.
    pub async fn update(&self, id: &str, patch: VideoPatch) -> Result<DateTime<Utc>, GatewayError> {
        let path = self.path(id).ok_or(GatewayError::Update)?;
        let mut fields = to_fields(&patch).map_err(|err| {
            tracing::error!(%path, error = %err, "failed to encode record patch");
            GatewayError::Update
        })?;
        let now = self.stamper.stamp();
        fields.insert(
            "updatedAt".to_string(),
            StoreTimestamp::from_datetime(now).to_value(),
        );

        self.store
            .apply(Mutation::patch(path.clone(), fields))
            .await
            .map_err(|err| {
                tracing::error!(%path, error = %err, "failed to update record");
                GatewayError::Update
            })?;

        tracing::info!(%path, "record updated");
        Ok(now)
    }

    /// Remove a record. Removing an id the store does not hold is left to the
    /// store, which treats it as success.
    pub async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let path = self.path(id).ok_or(GatewayError::Delete)?;
        self.store
            .apply(Mutation::delete(path.clone()))
            .await
            .map_err(|err| {
                tracing::error!(%path, error = %err, "failed to delete record");
                GatewayError::Delete
            })?;

        tracing::info!(%path, "record deleted");
        Ok(())
    }

    fn path(&self, id: &str) -> Option<DocumentPath> {
        DocumentPath::new(&self.collection, id)
            .inspect_err(|err| {
                tracing::error!(collection = %self.collection, id, error = %err, "invalid document address");
            })
            .ok()
    }
}
