use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    db::dao::DaoLayerError,
    db::entities::todo::clean_title,
    db::{NewTodo, Todo, TodoChanges, TodoRepository},
    error::{AppError, FieldErrors, NOT_FOUND_MESSAGE},
};

#[derive(Clone, Copy)]
enum TodoOp {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl TodoOp {
    fn failure(self) -> &'static str {
        match self {
            TodoOp::Create => "Create failed",
            TodoOp::List | TodoOp::Get => "Find failed",
            TodoOp::Update => "Update failed",
            TodoOp::Delete => "Delete failed",
        }
    }
}

/// Todo operations on top of whichever repository the app was started with.
///
/// This is the only place title rules ([`clean_title`]) are applied: request
/// decoding checks presence and JSON types, storage engines trust their input.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new: NewTodo) -> Result<Todo, AppError> {
        let new = NewTodo {
            title: validate_title(&new.title)?,
            status: new.status,
        };
        let todo = self
            .repo
            .create(new)
            .await
            .map_err(|err| map_error(TodoOp::Create, err))?;
        info!(todo_id = todo.id, "todo created");
        Ok(todo)
    }

    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let todos = self
            .repo
            .list()
            .await
            .map_err(|err| map_error(TodoOp::List, err))?;
        debug!(count = todos.len(), "todos listed");
        Ok(todos)
    }

    pub async fn get(&self, id: i32) -> Result<Todo, AppError> {
        self.repo
            .get(id)
            .await
            .map_err(|err| map_error(TodoOp::Get, err))
    }

    pub async fn update(&self, id: i32, changes: TodoChanges) -> Result<Todo, AppError> {
        let title = match changes.title {
            Some(title) => Some(validate_title(&title)?),
            None => None,
        };
        let changes = TodoChanges {
            title,
            status: changes.status,
        };
        let todo = self
            .repo
            .update(id, changes)
            .await
            .map_err(|err| map_error(TodoOp::Update, err))?;
        info!(todo_id = todo.id, status = todo.status, "todo updated");
        Ok(todo)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repo
            .delete(id)
            .await
            .map_err(|err| map_error(TodoOp::Delete, err))?;
        info!(todo_id = id, "todo deleted");
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<String, AppError> {
    clean_title(title)
        .map_err(|err| AppError::Validation(FieldErrors::single("title", err.to_string())))
}

fn map_error(op: TodoOp, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        DaoLayerError::Db(db_err) => AppError::internal_with_source(
            format!("{}. Please check the logs for more details", op.failure()),
            db_err,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::TodoService;
    use crate::db::dao::{DaoBase, TodoDao};
    use crate::db::entities::todo;
    use crate::db::{InMemoryTodoStore, NewTodo, TodoChanges};

    fn service() -> TodoService {
        TodoService::new(Arc::new(InMemoryTodoStore::new()))
    }

    fn new_todo(title: &str, status: bool) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn create_stores_an_incomplete_todo_with_equal_timestamps() {
        let todo = service().create(new_todo("Buy milk", false)).await.expect("create");

        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.status);
        assert_eq!(todo.created, todo.updated);
        assert_eq!(todo.to_string(), "Buy milk");
    }

    #[tokio::test]
    async fn create_rejects_invalid_titles_before_touching_storage() {
        let service = service();

        let blank = service.create(new_todo("", false)).await.expect_err("blank title");
        let long = service
            .create(new_todo(&"a".repeat(201), true))
            .await
            .expect_err("overlong title");

        assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
        assert_eq!(long.status(), StatusCode::BAD_REQUEST);
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_keeps_created_and_advances_updated() {
        let service = service();
        let todo = service.create(new_todo("Buy milk", false)).await.expect("create");

        let renamed = service
            .update(
                todo.id,
                TodoChanges {
                    title: Some("  Buy oat milk ".to_string()),
                    status: None,
                },
            )
            .await
            .expect("update");

        assert_eq!(renamed.title, "Buy oat milk");
        assert_eq!(renamed.created, todo.created);
        assert!(renamed.updated > todo.updated);
    }

    #[tokio::test]
    async fn update_with_invalid_title_is_a_validation_error() {
        let service = service();
        let todo = service.create(new_todo("Buy milk", false)).await.expect("create");

        let err = service
            .update(
                todo.id,
                TodoChanges {
                    title: Some(" ".to_string()),
                    status: Some(true),
                },
            )
            .await
            .expect_err("blank title");

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        let stored = service.get(todo.id).await.expect("get");
        assert!(!stored.status);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_for_every_operation() {
        let service = service();

        for status in [
            service.get(5).await.map(|_| ()).expect_err("get").status(),
            service
                .update(5, TodoChanges::default())
                .await
                .map(|_| ())
                .expect_err("update")
                .status(),
            service.delete(5).await.expect_err("delete").status(),
        ] {
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn create_trims_the_title_once_before_storing() {
        let todo = service()
            .create(new_todo("  Walk dog \n", true))
            .await
            .expect("create");

        assert_eq!(todo.title, "Walk dog");
        assert!(todo.status);
    }

    #[tokio::test]
    async fn update_of_a_row_deleted_mid_write_is_not_found() {
        let stamp = chrono::FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[todo::Model {
                id: 3,
                created: stamp,
                updated: stamp,
                title: "Buy milk".to_string(),
                status: false,
            }]])
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();
        let service = TodoService::new(Arc::new(TodoDao::new(&db)));

        let err = service
            .update(
                3,
                TodoChanges {
                    title: None,
                    status: Some(true),
                },
            )
            .await
            .expect_err("vanished row should fail");

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found.");
    }

    #[tokio::test]
    async fn database_failures_become_internal_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let service = TodoService::new(Arc::new(TodoDao::new(&db)));

        let err = service.list().await.expect_err("list should fail");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Find failed. Please check the logs for more details"
        );
    }
}
