//! Error type returned by the audio routes.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Every failure an audio route can report. Each request ends in at most one of these.
#[derive(Debug, Error)]
pub enum AudioApiError {
    #[error("Invalid id value")]
    InvalidIdentifier,

    #[error("Audio file required")]
    MissingAudio,

    #[error("Title field required")]
    MissingTitle,

    #[error("Genre Field required")]
    MissingGenre,

    #[error("Audio entry not found")]
    NotFound,

    #[error("{message}")]
    MalformedUpload { status: StatusCode, message: String },

    #[error("{0}")]
    StorageFailure(String),
}

impl AudioApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            AudioApiError::InvalidIdentifier
            | AudioApiError::MissingAudio
            | AudioApiError::MissingTitle
            | AudioApiError::MissingGenre => StatusCode::BAD_REQUEST,
            AudioApiError::NotFound => StatusCode::NOT_FOUND,
            AudioApiError::MalformedUpload { status, .. } => *status,
            AudioApiError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AudioApiError {
    fn from(err: anyhow::Error) -> Self {
        AudioApiError::StorageFailure(format!("{:#}", err))
    }
}

impl From<MultipartError> for AudioApiError {
    fn from(err: MultipartError) -> Self {
        AudioApiError::MalformedUpload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for AudioApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Audio request failed: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
