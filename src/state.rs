use std::sync::Arc;

use crate::{config::AppConfig, db::TodoRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub todos: Arc<dyn TodoRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, todos: Arc<dyn TodoRepository>) -> Arc<Self> {
        Arc::new(Self { config, todos })
    }
}
