use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CarError {
    /// Backing document missing or unparsable. Recovered by the store, never returned over HTTP.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Car with ID {0} already exists")]
    DuplicateId(u64),

    #[error("Car with ID {0} not found")]
    NotFound(u64),

    /// The highest id is already `u64::MAX`, so no id can be assigned.
    #[error("No car id left to assign after {0}")]
    IdSpaceExhausted(u64),

    #[error("Store task failed: {0}")]
    TaskJoin(String),

    #[error("Failed to persist {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CarError {
    pub fn status(&self) -> StatusCode {
        match self {
            CarError::DuplicateId(_) | CarError::IdSpaceExhausted(_) => StatusCode::CONFLICT,
            CarError::NotFound(_) => StatusCode::NOT_FOUND,
            CarError::StorageUnavailable(_)
            | CarError::Persistence { .. }
            | CarError::TaskJoin(_)
            | CarError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CarError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match self {
            CarError::DuplicateId(_) => "Car with this ID already exists",
            CarError::NotFound(_) => "Car not found",
            CarError::IdSpaceExhausted(_) => "No car ID left to assign; provide an explicit ID",
            CarError::Persistence { .. } => "Failed to persist car data",
            CarError::StorageUnavailable(_) | CarError::TaskJoin(_) | CarError::Json(_) => {
                "An internal server error occurred."
            }
        };
        (
            status,
            Json(ApiErrorResponse {
                error: error.to_string(),
            }),
        )
            .into_response()
    }
}

/// Error body shared by every failing route: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// Success body for mutating routes: `{"message": "..."}`.
#[derive(Serialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
