//! # Spotify Integration Module
//!
//! This module is the HTTP boundary between SpotDiscover and the Spotify Web
//! API. It covers exactly the provider surface the sync loop needs, organized
//! one file per domain:
//!
//! ```text
//! Application Layer (API handlers, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (code exchange, token refresh)
//!     ├── User Data (profile, top artists/tracks)
//!     ├── Playlist Operations (find, create, clear, fill)
//!     └── Track Discovery (recommendations, name search)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 authorization-code exchange and refresh-token grant,
//!   authenticated with basic-auth client credentials
//! - [`user`] - `/me` profile and `/me/top/{artists,tracks}` retrieval
//! - [`playlist`] - playlist lookup, creation, and track mutation
//! - [`tracks`] - recommendation requests and track-name search
//!
//! ## Error Mapping
//!
//! Every call maps HTTP status codes onto the crate's [`SyncError`]
//! (`crate::error::SyncError`) taxonomy:
//!
//! - `401 Unauthorized` becomes [`SyncError::CredentialInvalid`] and is the
//!   sole expiry signal; only the token manager ever handles it
//! - `404 Not Found` on a playlist becomes [`SyncError::TargetNotFound`]
//! - any other non-2xx or transport failure becomes [`SyncError::Provider`]
//! - `429 Too Many Requests` on the read-heavy discovery endpoints is retried
//!   after the provider's `Retry-After` delay (up to 120 seconds)
//!
//! No function in here retries on 401 or caches tokens; validity and refresh
//! are owned entirely by `crate::management::TokenManager`.

use reqwest::{Response, StatusCode};

use crate::error::SyncError;

pub mod auth;
pub mod playlist;
pub mod tracks;
pub mod user;

/// Maps a provider response onto the error taxonomy: 401 is the credential
/// expiry signal, every other non-2xx is a transient provider failure.
pub(crate) fn ensure_authorized(response: Response) -> Result<Response, SyncError> {
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(SyncError::CredentialInvalid);
    }
    response.error_for_status().map_err(SyncError::from)
}
