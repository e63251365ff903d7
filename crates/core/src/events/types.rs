use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Change notifications published by the store after each successful write.
/// Live streams react to them by re-reading the affected collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    Created(ChangeEvent),
    Updated(ChangeEvent),
    Deleted(ChangeEvent),
}

impl StoreEvent {
    pub fn change(&self) -> &ChangeEvent {
        match self {
            StoreEvent::Created(change)
            | StoreEvent::Updated(change)
            | StoreEvent::Deleted(change) => change,
        }
    }

    pub fn collection(&self) -> &str {
        &self.change().collection
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub collection: String,
    pub document_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn now(collection: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document_id: document_id.into(),
            timestamp: Utc::now(),
        }
    }
}
