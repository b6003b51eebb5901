use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::api::ErrorResponse;

pub const INVALID_IMAGE_MESSAGE: &str = "Uploaded file is not a valid image.";

/// The two caller-visible failure classes. An upload that does not decode as
/// an image gets the fixed 400; everything else collapses into a 500 whose
/// message is the underlying error's text.
#[derive(Debug)]
pub enum ApiError {
    InvalidImage,
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidImage => {
                (StatusCode::BAD_REQUEST, INVALID_IMAGE_MESSAGE.to_string())
            }
            ApiError::Internal(err) => {
                error!("Describe request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
