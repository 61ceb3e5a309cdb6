use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message surfaced when a fetch yields no admissible readings.
pub const NO_DATA_MESSAGE: &str = "Tidak ada data";

/// Unified application error.
///
/// Every query handler returns this type. `NoData` (404) must never be
/// folded into a server failure (500).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("{0}")]
    NoData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn no_data() -> Self {
        Self::NoData(NO_DATA_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoData(_) => StatusCode::NOT_FOUND,
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
