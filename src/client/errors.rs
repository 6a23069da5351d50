//! Client-side error taxonomy

use thiserror::Error;

/// Shown when a failure carries no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors raised by the admin client
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 401 or 403
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Map a non-2xx status and the server's message to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Api { status, message },
        }
    }

    /// Text for the error banner: the server's message, or the generic fallback
    pub fn banner_message(&self) -> String {
        let message = match self {
            Self::Network(_) => "",
            Self::Validation(m)
            | Self::NotFound(m)
            | Self::Unauthorized(m)
            | Self::Conflict(m)
            | Self::Api { message: m, .. } => m.as_str(),
        };
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message.to_string()
        }
    }

    /// Whether the session should be dropped and the user sent to login
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(
            ClientError::from_status(400, "bad".into()),
            ClientError::Validation("bad".into())
        );
        assert!(matches!(
            ClientError::from_status(403, String::new()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            ClientError::from_status(409, String::new()),
            ClientError::Conflict(_)
        ));
        assert_eq!(
            ClientError::from_status(503, "down".into()),
            ClientError::Api {
                status: 503,
                message: "down".into()
            }
        );
    }

    #[test]
    fn test_banner_message_prefers_server_message() {
        assert_eq!(
            ClientError::NotFound("User x not found".into()).banner_message(),
            "User x not found"
        );
        assert_eq!(
            ClientError::Api {
                status: 500,
                message: " ".into()
            }
            .banner_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            ClientError::Network("connection refused".into()).banner_message(),
            GENERIC_ERROR_MESSAGE
        );
    }
}
