use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::dao::{DaoLayerError, DaoResult};
use super::repository::{NewTodo, Todo, TodoChanges, TodoRepository};
use super::timestamps;

const ENTITY: &str = "todo";

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, Todo>,
}

/// Process-local todo storage. Ids are never reused, even after deletes.
#[derive(Default)]
pub struct InMemoryTodoStore {
    state: RwLock<MemoryState>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: i32) -> DaoLayerError {
    DaoLayerError::NotFound { entity: ENTITY, id }
}

#[async_trait]
impl TodoRepository for InMemoryTodoStore {
    async fn create(&self, new: NewTodo) -> DaoResult<Todo> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| DbErr::Custom("todo id sequence exhausted".to_string()))?;
        let now = timestamps::now();
        let todo = Todo {
            id,
            created: now,
            updated: now,
            title: new.title,
            status: new.status,
        };
        state.last_id = id;
        state.rows.insert(id, todo.clone());
        Ok(todo)
    }

    async fn list(&self) -> DaoResult<Vec<Todo>> {
        let state = self.state.read().await;
        let mut todos: Vec<Todo> = state.rows.values().cloned().collect();
        todos.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(todos)
    }

    async fn get(&self, id: i32) -> DaoResult<Todo> {
        let state = self.state.read().await;
        state.rows.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn update(&self, id: i32, changes: TodoChanges) -> DaoResult<Todo> {
        let mut state = self.state.write().await;
        let todo = state.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(status) = changes.status {
            todo.status = status;
        }
        todo.updated = timestamps::next_updated(Some(todo.updated));
        Ok(todo.clone())
    }

    async fn delete(&self, id: i32) -> DaoResult<()> {
        let mut state = self.state.write().await;
        state.rows.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
