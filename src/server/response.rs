//! Wire response bodies and error → status mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::types::{QuizError, QuizSet};

/// `200` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "quizData")]
    pub quiz_data: QuizSet,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorBody {
    fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            raw: None,
            detail: None,
        }
    }
}

/// Handler error: converts a `QuizError` into a JSON response
#[derive(Debug)]
pub struct ApiError(pub QuizError);

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and body for the wrapped error
    pub fn parts(&self) -> (StatusCode, ErrorBody) {
        match &self.0 {
            QuizError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, ErrorBody::message(message.clone()))
            }
            QuizError::Extraction(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    raw: err.raw().map(|raw| Value::String(raw.to_string())),
                    ..ErrorBody::message(err.to_string())
                },
            ),
            QuizError::CollaboratorEmptyResponse { provider, raw } => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    raw: Some(raw.clone()),
                    ..ErrorBody::message(format!("No content returned from {}", provider))
                },
            ),
            QuizError::CollaboratorUnavailable(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    detail: Some(err.diagnostic()),
                    ..ErrorBody::message("Internal server error")
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::message("Internal server error"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self.0);
        } else {
            warn!("Rejected request ({}): {}", status, self.0);
        }
        (status, Json(body)).into_response()
    }
}
