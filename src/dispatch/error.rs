//! Request dispatch errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The action panicked; the request fails, the server keeps serving.
    #[error("action {action} panicked: {message}")]
    Panicked { action: String, message: String },

    /// The request body could not be buffered (over the size limit or cut off).
    #[error("failed to read request body: {0}")]
    Body(String),
}

impl DispatchError {
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Panicked { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DispatchError::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let body = match &self {
            DispatchError::Panicked { .. } => "Internal dispatch error",
            DispatchError::Body(_) => "Request body too large",
        };
        (self.status(), body).into_response()
    }
}
