use std::sync::Arc;

use crate::store::ItemStore;

/// Shared handler state. Built once at startup and passed to the router.
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}
