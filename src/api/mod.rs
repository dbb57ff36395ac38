//! # API Module
//!
//! HTTP endpoints for the SpotDiscover web layer. This is deliberately thin
//! glue around the management layer: the handlers parse requests, render
//! minimal HTML, and delegate everything stateful to
//! [`crate::management`].
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's authorization page with
//!   the configured scope and a per-server-start state nonce
//! - [`callback`] - Handles the OAuth redirect: verifies the state, exchanges
//!   the authorization code for the initial token pair and installs it as
//!   the process-wide credential
//!
//! ### Playlist
//!
//! - [`generate`] - Builds the discovery playlist for the authenticated user
//!   and registers the recurring refresh job
//!
//! ### Monitoring
//!
//! - [`index`] - Minimal landing page with the login entry point
//! - [`health`] - Status and version for monitoring systems
//!
//! User-visible failures here are simple HTML messages; the typed error
//! taxonomy stays inside the management layer.

mod callback;
mod generate;
mod health;
mod pages;

pub use callback::callback;
pub use generate::generate;
pub use health::health;
pub use pages::index;
pub use pages::login;
