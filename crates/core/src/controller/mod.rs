//! List controller: owns the view state and drives it from the gateway.

pub mod confirm;
pub mod state;

use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::document::validate::validate_document_id;
use crate::document::{TimestampLike, VideoRecord};
use crate::format;
use crate::gateway::{RecordStream, VideoGateway};
use crate::store::DocumentStore;

pub use confirm::{Confirm, StaticConfirm};
pub use state::{ViewState, EMPTY_ADVISORY};

pub const CONFIRM_DELETE_PROMPT: &str = "Are you sure you want to delete this record?";

/// How a [`ListController::remove`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoveOutcome {
    /// The record had no id; nothing was asked or sent.
    MissingId,
    Cancelled,
    Deleted,
    Failed,
}

pub struct ListController<S> {
    gateway: Arc<VideoGateway<S>>,
    state: Arc<watch::Sender<ViewState>>,
    /// The one live subscription, if any.
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl<S: DocumentStore> ListController<S> {
    /// Idle controller; nothing is subscribed until [`reload`](Self::reload).
    pub fn new(gateway: Arc<VideoGateway<S>>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            gateway,
            state: Arc::new(state),
            subscription: Mutex::new(None),
        }
    }

    /// Build a controller and start loading immediately.
    pub async fn start(gateway: Arc<VideoGateway<S>>) -> Self {
        let controller = Self::new(gateway);
        controller.reload().await;
        controller
    }

    pub fn gateway(&self) -> &VideoGateway<S> {
        &self.gateway
    }

    /// Observe state changes.
    pub fn watch(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Enter loading and (re)subscribe. The previous subscription is fully
    /// released before the new one opens, so concurrent reloads still leave
    /// exactly one live feed.
    pub async fn reload(&self) {
        let mut subscription = self.subscription.lock().await;
        if let Some(task) = subscription.take() {
            task.abort();
            if let Err(err) = task.await {
                if err.is_panic() {
                    tracing::error!(error = %err, "subscription task panicked");
                }
            }
        }

        self.state.send_modify(ViewState::begin_loading);
        tracing::info!(collection = self.gateway.collection(), "loading records");

        let records = self.gateway.get_all();
        *subscription = Some(tokio::spawn(drive(records, Arc::clone(&self.state))));
    }

    /// Delete `record` after external confirmation, then reload. A failed
    /// delete leaves the list as it was and sets an error message.
    pub async fn remove(&self, record: &VideoRecord, confirm: &dyn Confirm) -> RemoveOutcome {
        let id = match validate_document_id(record.id.as_deref()) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(error = %err, "record cannot be deleted");
                self.set_error(err.to_string());
                return RemoveOutcome::MissingId;
            }
        };

        if !confirm.confirm(CONFIRM_DELETE_PROMPT).await {
            tracing::debug!(id, "delete cancelled");
            return RemoveOutcome::Cancelled;
        }

        match self.gateway.delete(id).await {
            Ok(()) => {
                self.reload().await;
                RemoveOutcome::Deleted
            }
            Err(err) => {
                self.set_error(err.to_string());
                RemoveOutcome::Failed
            }
        }
    }

    /// Editing is not wired to any write yet; this only records the request.
    pub fn edit(&self, record: &VideoRecord) {
        tracing::info!(id = ?record.id, title = %record.title, "edit requested");
    }

    /// See [`format::format_display_date`].
    pub fn format_display_date(value: impl Into<TimestampLike>) -> String {
        format::format_display_date(value)
    }

    fn set_error(&self, message: String) {
        self.state.send_modify(|state| state.error = Some(message));
    }
}

impl<S> Drop for ListController<S> {
    fn drop(&mut self) {
        if let Some(task) = self.subscription.get_mut().take() {
            task.abort();
        }
    }
}

/// Apply every emission to the view state until the feed fails or is aborted.
async fn drive(mut records: RecordStream, state: Arc<watch::Sender<ViewState>>) {
    while let Some(item) = records.next().await {
        match item {
            Ok(list) => {
                tracing::debug!(count = list.len(), "records updated");
                state.send_modify(|view| view.apply_snapshot(list));
            }
            Err(err) => {
                tracing::error!(error = %err, "record feed failed");
                state.send_modify(|view| view.apply_failure(&err));
                break;
            }
        }
    }
}
