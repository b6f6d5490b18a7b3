use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use passgate_user::UserError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Conflict(String),

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Internal server error")]
    InternalError(String),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists | UserError::UsernameTaken => {
                AppError::Conflict(err.to_string())
            }
            UserError::InvalidCredentials => AppError::InvalidCredentials,
            other => AppError::InternalError(format!("{other:?}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        match self {
            AppError::Conflict(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response()
            }
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({ "detail": detail })),
            )
                .into_response(),
            AppError::TemplateError(e) => {
                tracing::error!("Failed to render template: {:?}", e);
                internal_error()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal server error" })),
    )
        .into_response()
}
