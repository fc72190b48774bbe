use async_trait::async_trait;
use sea_orm::{DatabaseConnection, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::Todos;
use crate::db::entities::todo;
use crate::db::repository::{NewTodo, Todo, TodoChanges, TodoRepository};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todos;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl TodoRepository for TodoDao {
    async fn create(&self, new: NewTodo) -> DaoResult<Todo> {
        let model = todo::ActiveModel {
            title: Set(new.title),
            status: Set(new.status),
            ..Default::default()
        };
        DaoBase::create(self, model).await
    }

    async fn list(&self) -> DaoResult<Vec<Todo>> {
        self.find_all().await
    }

    async fn get(&self, id: i32) -> DaoResult<Todo> {
        self.find_by_id(id).await
    }

    async fn update(&self, id: i32, changes: TodoChanges) -> DaoResult<Todo> {
        let TodoChanges { title, status } = changes;
        DaoBase::update(self, id, move |active| {
            if let Some(title) = title {
                active.title = Set(title);
            }
            if let Some(status) = status {
                active.status = Set(status);
            }
        })
        .await
    }

    async fn delete(&self, id: i32) -> DaoResult<()> {
        DaoBase::delete(self, id).await.map(|_| ())
    }
}
