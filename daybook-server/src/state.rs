use std::sync::Arc;

use daybook_core::EventStore;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<EventStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve an existing store, e.g. one a test wants to inspect afterwards.
    pub fn with_store(store: Arc<EventStore>) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }
}
