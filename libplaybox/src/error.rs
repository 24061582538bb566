//! Error types for Playbox

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayboxError>;

/// Outcome of a fallible remote call.
///
/// Every call that crosses the network boundary is normalized into this type,
/// so nothing downstream ever sees transport errors or status codes directly.
pub type Outcome<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum PlayboxError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Api error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlayboxError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PlayboxError::InvalidInput(_) => 3,
            PlayboxError::Api(ApiError::Status(StatusCodeError { code: 401 | 403 })) => 2,
            PlayboxError::Api(_) => 1,
            PlayboxError::Config(_) => 1,
            PlayboxError::Serialization(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Non-success HTTP status returned by the remote api
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Api error with errorCode: {code}")]
pub struct StatusCodeError {
    pub code: u16,
}

/// Error half of an [`Outcome`].
///
/// Each variant carries a fixed message and, where one exists, the underlying
/// cause. Use [`ApiError::message`] and [`ApiError::cause`] to read them.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The call succeeded but returned no body
    #[error("Body cannot be null on a successful response")]
    EmptyBody,

    /// The server answered with a non-success status
    #[error("Api error with errorCode: {}", .0.code)]
    Status(#[source] StatusCodeError),

    /// The call itself failed (connection, timeout, malformed body, ...)
    #[error("Received Exception as part of api call")]
    Transport(#[source] Arc<dyn StdError + Send + Sync + 'static>),
}

impl ApiError {
    pub fn status(code: u16) -> Self {
        ApiError::Status(StatusCodeError { code })
    }

    pub fn transport<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ApiError::Transport(Arc::new(error))
    }

    /// Human-readable message of this error
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Underlying cause, if any
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }

    /// Status code for [`ApiError::Status`], `None` otherwise
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status(status) => Some(status.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = PlayboxError::InvalidInput("Empty tag".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_unauthorized() {
        let error = PlayboxError::Api(ApiError::status(401));
        assert_eq!(error.exit_code(), 2);

        let error = PlayboxError::Api(ApiError::status(403));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_other_api_errors() {
        assert_eq!(PlayboxError::Api(ApiError::status(404)).exit_code(), 1);
        assert_eq!(PlayboxError::Api(ApiError::EmptyBody).exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = PlayboxError::Config(ConfigError::MissingField("flickr.api_key".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_empty_body_has_no_cause() {
        let error = ApiError::EmptyBody;
        assert_eq!(error.message(), "Body cannot be null on a successful response");
        assert!(error.cause().is_none());
    }

    #[test]
    fn test_status_error_carries_cause_with_same_text() {
        let error = ApiError::status(404);
        assert_eq!(error.message(), "Api error with errorCode: 404");
        assert_eq!(error.status_code(), Some(404));

        let cause = error.cause().expect("status errors carry a cause");
        assert_eq!(cause.to_string(), "Api error with errorCode: 404");
    }

    #[test]
    fn test_transport_error_keeps_original_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = ApiError::transport(io);

        assert_eq!(error.message(), "Received Exception as part of api call");
        assert_eq!(error.cause().map(|c| c.to_string()), Some("refused".to_string()));
        assert_eq!(error.status_code(), None);
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = PlayboxError::Config(ConfigError::MissingField("flickr.api_key".to_string()));
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: flickr.api_key"
        );
    }

    #[test]
    fn test_error_conversion_from_api_error() {
        let error: PlayboxError = ApiError::EmptyBody.into();
        match error {
            PlayboxError::Api(ApiError::EmptyBody) => {}
            _ => panic!("Expected PlayboxError::Api"),
        }
    }
}
