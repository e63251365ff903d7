use std::sync::Arc;

use video_desk_core::{InMemoryStore, ListController};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    store: InMemoryStore,
    controller: ListController<InMemoryStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: InMemoryStore, controller: ListController<InMemoryStore>) -> Self {
        Self {
            inner: Arc::new(InnerState {
                config,
                store,
                controller,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.inner.store
    }

    pub fn controller(&self) -> &ListController<InMemoryStore> {
        &self.inner.controller
    }
}
