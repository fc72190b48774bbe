use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;

use super::{REQUIRED, boolean_field, parse_object, string_field};
use crate::{
    db::repository::{NewTodo, Todo, TodoChanges},
    error::{AppError, FieldErrors},
};

const TITLE: &str = "title";
const STATUS: &str = "status";

/// How strictly a write payload is checked for missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// `title` required, `status` defaults to false.
    Create,
    /// Every writable field required (PUT).
    Replace,
    /// Nothing required (PATCH).
    Partial,
}

impl WriteMode {
    fn requires_title(self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }

    fn requires_status(self) -> bool {
        matches!(self, Self::Replace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub status: bool,
    pub created: DateTimeWithTimeZone,
    pub updated: DateTimeWithTimeZone,
}

impl From<Todo> for TodoResponse {
    fn from(model: Todo) -> Self {
        Self {
            id: model.id,
            title: model.title,
            status: model.status,
            created: model.created,
            updated: model.updated,
        }
    }
}

pub fn encode_list(todos: Vec<Todo>) -> Vec<TodoResponse> {
    todos.into_iter().map(TodoResponse::from).collect()
}

pub fn decode_create(body: &[u8]) -> Result<NewTodo, AppError> {
    let TodoChanges { title, status } = decode_fields(body, WriteMode::Create)?;
    let Some(title) = title else {
        return Err(AppError::Validation(FieldErrors::single(TITLE, REQUIRED)));
    };
    Ok(NewTodo {
        title,
        status: status.unwrap_or(false),
    })
}

pub fn decode_update(body: &[u8], mode: WriteMode) -> Result<TodoChanges, AppError> {
    decode_fields(body, mode)
}

// Presence and JSON types only; title content is checked by `TodoService`.
// Read-only (`id`, `created`, `updated`) and unknown keys are ignored so a
// client can send back an object it previously received.
fn decode_fields(body: &[u8], mode: WriteMode) -> Result<TodoChanges, AppError> {
    let data = parse_object(body)?;
    let mut errors = FieldErrors::new();

    let title = string_field(&data, TITLE, mode.requires_title(), &mut errors).into_option();
    let status = boolean_field(&data, STATUS, mode.requires_status(), &mut errors).into_option();

    errors.into_result()?;
    Ok(TodoChanges { title, status })
}
