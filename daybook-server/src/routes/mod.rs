pub mod events;
pub mod health;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use daybook_core::DaybookError;

/// Standard API failure envelope
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Convert core errors to enveloped HTTP responses
#[derive(Debug)]
pub struct ApiError(DaybookError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DaybookError::NotFound(_) => StatusCode::NOT_FOUND,
            DaybookError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            success: false,
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<DaybookError> for ApiError {
    fn from(err: DaybookError) -> Self {
        ApiError(err)
    }
}
