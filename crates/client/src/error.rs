//! Typed error enum for the client crate.

use paddyscan_core::FailureKind;
use thiserror::Error;

/// Errors from calls to the classification service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl ClientError {
    /// Map onto the coarse failure taxonomy shown to users.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::JsonParse { .. } | Self::UnexpectedBody(_) => FailureKind::MalformedResponse,
            Self::HttpRequest(_)
            | Self::HttpStatus { .. }
            | Self::InvalidUrl(_)
            | Self::ClientInit(_) => FailureKind::NetworkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let status = ClientError::HttpStatus { code: 500, body: "boom".to_owned() };
        assert_eq!(status.kind(), FailureKind::NetworkError);
        assert!(status.to_string().contains("500"));

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = ClientError::JsonParse { context: "prediction".to_owned(), source };
        assert_eq!(parse.kind(), FailureKind::MalformedResponse);

        assert_eq!(
            ClientError::UnexpectedBody("Image not found".to_owned()).kind(),
            FailureKind::MalformedResponse
        );
        assert_eq!(ClientError::InvalidUrl("::".to_owned()).kind(), FailureKind::NetworkError);
    }
}
