use async_trait::async_trait;

use super::dao::DaoResult;

pub use super::entities::todo::Model as Todo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub status: bool,
}

/// Field updates for an existing todo. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub status: Option<bool>,
}

/// Persistence for todos. Engines assign ids and timestamps; title rules are
/// enforced one layer up so every engine shares them.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create(&self, new: NewTodo) -> DaoResult<Todo>;

    /// All todos, newest `created` first.
    async fn list(&self) -> DaoResult<Vec<Todo>>;

    async fn get(&self, id: i32) -> DaoResult<Todo>;

    /// Applies `changes` and moves `updated` forward, even when `changes` is empty.
    async fn update(&self, id: i32, changes: TodoChanges) -> DaoResult<Todo>;

    async fn delete(&self, id: i32) -> DaoResult<()>;
}
