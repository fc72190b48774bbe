use std::sync::Arc;

use axum::Router;

use crate::{config::AppConfig, db::InMemoryTodoStore, routes::app, state::AppState};

/// State over an empty in-memory store and default configuration.
pub fn test_state() -> Arc<AppState> {
    AppState::new(AppConfig::default(), Arc::new(InMemoryTodoStore::new()))
}

/// The full application, middleware included, backed by [`test_state`].
pub fn test_app() -> Router {
    app(test_state())
}
