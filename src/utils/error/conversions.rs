//! Type conversions into ServiceError

use super::types::ServiceError;
use sea_orm::{DbErr, SqlErr};

/// Classify a database error, reporting connectivity failures as transient
/// and unique-key violations as conflicts
pub fn classify_db_error(err: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return ServiceError::Conflict(format!("Record already exists: {}", detail));
    }
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            ServiceError::Unavailable(format!("User directory unreachable: {}", err))
        }
        DbErr::RecordNotFound(message) => ServiceError::NotFound(message),
        other => ServiceError::Database(other),
    }
}

impl From<actix_web::error::JsonPayloadError> for ServiceError {
    fn from(err: actix_web::error::JsonPayloadError) -> Self {
        ServiceError::Validation(format!("Invalid request body: {}", err))
    }
}

impl From<actix_web::error::PathError> for ServiceError {
    fn from(err: actix_web::error::PathError) -> Self {
        ServiceError::Validation(format!("Invalid path: {}", err))
    }
}

