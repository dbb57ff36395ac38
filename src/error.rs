//! Error types for token lifecycle and playlist sync operations.

use thiserror::Error;

/// Result type alias using the crate's [`SyncError`] type.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while keeping a credential fresh or reconciling
/// the discovery playlist.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The session cannot be recovered without a new login. Raised when no
    /// credential is held, no refresh token is available, or a refresh
    /// attempt was rejected by the token endpoint.
    #[error("authorization expired; log in again")]
    AuthExpired,

    /// The provider rejected the current access token (HTTP 401). Recoverable
    /// via refresh; callers outside the token manager never see this variant.
    #[error("access token rejected by the provider")]
    CredentialInvalid,

    /// The target playlist no longer exists. Terminal for the refresh job,
    /// not an error for the system as a whole.
    #[error("target playlist not found: {0}")]
    TargetNotFound(String),

    /// The token endpoint answered 2xx but without a usable access token.
    #[error("token endpoint returned an empty access token")]
    EmptyAccessToken,

    /// Transient HTTP failure talking to the provider (network error or
    /// non-2xx other than 401). Retried on the next scheduled cycle.
    #[error("provider request failed: {0}")]
    Provider(#[from] reqwest::Error),

    /// Local token cache could not be read or written.
    #[error("token cache error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while (de)serializing the cached credential.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_expired_display() {
        let err = SyncError::AuthExpired;
        assert_eq!(err.to_string(), "authorization expired; log in again");
    }

    #[test]
    fn test_target_not_found_display() {
        let err = SyncError::TargetNotFound("SpotDiscover".to_string());
        assert_eq!(err.to_string(), "target playlist not found: SpotDiscover");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SyncError = io_err.into();
        assert!(matches!(err, SyncError::Io(_)));
    }
}
