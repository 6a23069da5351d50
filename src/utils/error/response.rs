//! HTTP response handling for errors

use super::types::ServiceError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unauthorized(_) | ServiceError::Jwt(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServiceError::Database(_) => "Database operation failed".to_string(),
            ServiceError::Redis(_) | ServiceError::Cache(_) => "Cache operation failed".to_string(),
            ServiceError::Jwt(_) => "Invalid or expired token".to_string(),
            ServiceError::Validation(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::Conflict(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::Unavailable(msg) => msg.clone(),
            _ => "An internal error occurred".to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message,
            code: self.code().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
    pub timestamp: i64,
}
