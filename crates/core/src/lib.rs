//! Video record synchronization: a live, normalizing gateway over a document
//! store and the list controller that drives a dashboard view from it.

pub mod controller;
pub mod document;
pub mod error;
pub mod events;
pub mod format;
pub mod gateway;
pub mod mutation;
pub mod store;

pub use controller::{Confirm, ListController, RemoveOutcome, StaticConfirm, ViewState};
pub use document::{NewVideo, RawDocument, VideoPatch, VideoRecord};
pub use error::{GatewayError, StoreError};
pub use format::format_display_date;
pub use gateway::{Clock, SystemClock, VideoGateway, VIDEO_COLLECTION};
pub use store::{DocumentStore, InMemoryStore};
