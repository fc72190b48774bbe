use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, cors_layer, json_error_middleware},
    state::AppState,
};

use super::todos;

pub const API_PREFIX: &str = "/api";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().nest(API_PREFIX, todos::router(state))
}

/// The routed application with the full middleware stack applied.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);
    let app = router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer());

    let app = match cors {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
}
