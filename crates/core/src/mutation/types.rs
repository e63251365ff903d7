//! Single-document writes understood by a [`DocumentStore`](crate::store::DocumentStore).
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::DocumentPath;

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(CreateMutation),
    Patch(PatchMutation),
    Delete(DeleteMutation),
}

impl Mutation {
    pub fn create(collection: impl Into<String>, document: Map<String, Value>) -> Self {
        Mutation::Create(CreateMutation {
            collection: collection.into(),
            document,
        })
    }

    pub fn patch(path: DocumentPath, set: Map<String, Value>) -> Self {
        Mutation::Patch(PatchMutation { path, set })
    }

    pub fn delete(path: DocumentPath) -> Self {
        Mutation::Delete(DeleteMutation { path })
    }

    pub fn operation(&self) -> Operation {
        match self {
            Mutation::Create(_) => Operation::Create,
            Mutation::Patch(_) => Operation::Update,
            Mutation::Delete(_) => Operation::Delete,
        }
    }
}

/// New document in `collection`; the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMutation {
    pub collection: String,
    pub document: Map<String, Value>,
}

/// Overwrite only the listed top-level fields of an existing document.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchMutation {
    pub path: DocumentPath,
    pub set: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteMutation {
    pub path: DocumentPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub id: String,
    pub operation: Operation,
}
