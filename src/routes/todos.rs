use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
};

use crate::{
    response::ApiResult,
    serializers::todo::{
        TodoResponse, WriteMode, decode_create, decode_update, encode_list,
    },
    services::{ServiceContext, TodoService},
    state::AppState,
};

use super::TodoId;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos/", get(list_todos))
        .route("/todos/create/", post(create_todo))
        .route("/todos/{id}/", get(get_todo))
        .route("/todos/{id}/update/", put(replace_todo).patch(patch_todo))
        .route("/todos/{id}/delete/", delete(delete_todo))
        .with_state(state)
}

fn service(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TodoResponse>>> {
    let todos = service(&state).list().await?;
    Ok(Json(encode_list(todos)))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<TodoResponse>)> {
    let new = decode_create(&body)?;
    let todo = service(&state).create(new).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> ApiResult<Json<TodoResponse>> {
    let todo = service(&state).get(id).await?;
    Ok(Json(todo.into()))
}

async fn replace_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    body: Bytes,
) -> ApiResult<Json<TodoResponse>> {
    update_todo(&state, id, &body, WriteMode::Replace).await
}

async fn patch_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    body: Bytes,
) -> ApiResult<Json<TodoResponse>> {
    update_todo(&state, id, &body, WriteMode::Partial).await
}

// An unknown id wins over a bad payload.
async fn update_todo(
    state: &AppState,
    id: i32,
    body: &[u8],
    mode: WriteMode,
) -> ApiResult<Json<TodoResponse>> {
    let service = service(state);
    service.get(id).await?;
    let changes = decode_update(body, mode)?;
    let todo = service.update(id, changes).await?;
    Ok(Json(todo.into()))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> ApiResult<StatusCode> {
    service(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
