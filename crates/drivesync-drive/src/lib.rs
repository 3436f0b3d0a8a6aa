//! drivesync Drive - Google Drive v3 API client
//!
//! Provides async client for:
//! - OAuth2 refresh-token grant (non-interactive, credentials from a secret)
//! - Change-feed pagination (the Drive Changes API)
//! - File and folder metadata lookup by id
//! - Content download and Workspace document export
//!
//! ## Modules
//!
//! - [`auth`] - Refresh-token grant for short-lived access tokens
//! - [`client`] - Drive API HTTP client
//! - [`changes`] - Change-feed queries for incremental synchronization
//! - [`provider`] - [`IDriveClient`] port implementation
//!
//! [`IDriveClient`]: drivesync_core::ports::IDriveClient

pub mod auth;
pub mod changes;
pub mod client;
pub mod provider;

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when communicating with the Drive API
#[derive(Debug, Error)]
pub enum DriveError {
    /// Authentication credentials are invalid or the access token expired
    #[error("Unauthorized (401): {0}")]
    Unauthorized(String),

    /// Insufficient permissions for the requested operation
    #[error("Forbidden (403): {0}")]
    Forbidden(String),

    /// The requested resource does not exist
    #[error("Not found (404): {0}")]
    NotFound(String),

    /// Rate limit exceeded; retry after the specified duration
    #[error("Too many requests (429), retry after {retry_after:?}")]
    RateLimited {
        /// Duration to wait before retrying
        retry_after: Duration,
    },

    /// A server-side error occurred (5xx)
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DriveError {
    /// Classify an HTTP error status into a [`DriveError`]
    ///
    /// Used by the client after `send()`; success statuses never reach
    /// this function.
    pub(crate) fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        use reqwest::StatusCode;
        match status {
            StatusCode::UNAUTHORIZED => DriveError::Unauthorized(message),
            StatusCode::FORBIDDEN => DriveError::Forbidden(message),
            StatusCode::NOT_FOUND => DriveError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => DriveError::RateLimited {
                retry_after: Duration::from_secs(30),
            },
            s if s.is_server_error() => DriveError::ServerError {
                status: s.as_u16(),
                message,
            },
            s => DriveError::InvalidResponse(format!("unexpected status {s}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            DriveError::from_status(StatusCode::UNAUTHORIZED, "t".into()),
            DriveError::Unauthorized(_)
        ));
        assert!(matches!(
            DriveError::from_status(StatusCode::NOT_FOUND, "t".into()),
            DriveError::NotFound(_)
        ));
        assert!(matches!(
            DriveError::from_status(StatusCode::TOO_MANY_REQUESTS, "t".into()),
            DriveError::RateLimited { .. }
        ));
        assert!(matches!(
            DriveError::from_status(StatusCode::BAD_GATEWAY, "t".into()),
            DriveError::ServerError { status: 502, .. }
        ));
    }
}
