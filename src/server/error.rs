//! Central mapping from [`AppError`] to HTTP responses.
//!
//! Every failure, including malformed JSON bodies, is serialized into the
//! uniform shape `{success: false, payload: {message, timestamp, errors?}}`.
//! Database and internal failures are logged and reported with a generic
//! message so the response never leaks storage details.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Serialize;

use crate::libs::error::AppError;

#[derive(Debug, Serialize)]
struct ErrorPayload {
    message: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    payload: ErrorPayload,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BusinessRule(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (message, errors) = match self {
            AppError::Validation(errors) => (self.to_string(), Some(errors.clone())),
            AppError::BusinessRule(_) | AppError::NotFound(_) => (self.to_string(), None),
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("request failed: {}", self);
                ("Internal server error".to_string(), None)
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            payload: ErrorPayload {
                message,
                timestamp: Utc::now().to_rfc3339(),
                errors,
            },
        })
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

/// Funnels body deserialization failures through the uniform error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(vec![err.to_string()]).into()
}

/// Same, for query string deserialization failures.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(vec![err.to_string()]).into()
}
