use std::sync::Arc;

use crate::{db::TodoRepository, services::todo_service::TodoService, state::AppState};

#[derive(Clone)]
pub struct ServiceContext {
    todos: Arc<dyn TodoRepository>,
}

impl ServiceContext {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.todos))
    }

    pub fn todo(&self) -> TodoService {
        TodoService::new(Arc::clone(&self.todos))
    }
}
