use chirp_core::store::StateStore;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StateStore>,
    /// Identity of the managed phrase bot; derives the override and
    /// kill-switch store keys.
    pub bot_name: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn StateStore>, bot_name: &str) -> Self {
        Self {
            store,
            bot_name: Arc::from(bot_name),
        }
    }
}
