use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use typeshare::typeshare;

use crate::services::conversion::ConversionError;

#[typeshare]
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    status: u16,     // HTTP status code
    error: String,   // Short error identifier
    message: String, // Human-readable error message
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: &str) -> Self {
        ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<ConversionError> for ErrorResponse {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::Validation(_) => ErrorResponse::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                &err.to_string(),
            ),
            ConversionError::Provider(_) => {
                ErrorResponse::new(StatusCode::BAD_GATEWAY, "provider_error", &err.to_string())
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
