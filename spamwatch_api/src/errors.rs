//! Error types for the API client.

use chrono::{DateTime, Utc};

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API rejected the token (HTTP 401).
    #[error("Unauthorized: make sure your token is correct")]
    Unauthorized,
    /// The token lacks the permission tier the endpoint requires (HTTP 403).
    #[error("Forbidden: token '{token}' does not have the required permission")]
    Forbidden { token: String },
    /// The request payload or parameters were rejected (HTTP 400).
    #[error("Bad request: {body}")]
    BadRequest { body: String },
    /// The API rate limited this endpoint (HTTP 429).
    #[error("Too many requests for method '{method}', retry after {until}")]
    TooManyRequests { method: String, until: DateTime<Utc> },
    /// The API returned a non-success status the endpoint does not handle.
    #[error("Request failed with status {status}")]
    UnexpectedStatus { status: u16, body: String },
    /// The API failed on its side (HTTP 5xx).
    #[error("Server error with status {status}")]
    Server { status: u16, body: String },
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The token contains bytes that cannot be sent in an HTTP header.
    #[error("Token is not a valid header value")]
    InvalidToken,
}

impl Error {
    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::BadRequest { .. } => Some(400),
            Self::TooManyRequests { .. } => Some(429),
            Self::UnexpectedStatus { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidUrl(_) | Self::InvalidToken => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_of_response_errors() {
        assert_eq!(Error::Unauthorized.status(), Some(401));
        assert_eq!(
            Error::Forbidden {
                token: "abc".to_string()
            }
            .status(),
            Some(403)
        );
        assert_eq!(
            Error::Server {
                status: 502,
                body: String::new()
            }
            .status(),
            Some(502)
        );
        assert_eq!(Error::Decode("bad".to_string()).status(), None);
    }

    #[test]
    fn display_messages() {
        let err = Error::Forbidden {
            token: "secret".to_string(),
        };
        assert!(err.to_string().contains("secret"));

        let err = Error::TooManyRequests {
            method: "banlist".to_string(),
            until: DateTime::<Utc>::UNIX_EPOCH,
        };
        assert!(err.to_string().contains("'banlist'"));

        assert!(Error::Unauthorized.to_string().contains("token is correct"));
    }
}
