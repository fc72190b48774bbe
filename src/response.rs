use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<T, AppError>;

/// Envelope every error leaves the service in.
#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl JsonApiResponse<serde_json::Value> {
    pub(crate) fn from_error(err: &AppError) -> Self {
        let data = match err.field_errors() {
            Some(errors) => serde_json::to_value(errors).unwrap_or(serde_json::Value::Null),
            None => serde_json::Value::Null,
        };
        Self {
            status: err.status().as_u16(),
            message: err.to_string(),
            data,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log_app_error(&self, status);
        }
        JsonApiResponse::from_error(&self).into_response()
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    match std::error::Error::source(err) {
        Some(source) => tracing::error!(
            status = status.as_u16(),
            error = %err,
            source = %source,
            "request failed"
        ),
        None => tracing::error!(status = status.as_u16(), error = %err, "request failed"),
    }
}
