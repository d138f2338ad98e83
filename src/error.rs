use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("Missing required fields")]
    MissingFields,
    #[error("invalid departTime: {0}")]
    InvalidDepartTime(String),
    #[error("invalid seats: {0} is not an integer")]
    InvalidSeats(String),
    #[error("{0}")]
    MalformedBody(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::Other(_)
            | AppError::InvalidDepartTime(_)
            | AppError::InvalidSeats(_)
            | AppError::MalformedBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
