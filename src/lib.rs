//! SpotDiscover Service Library
//!
//! This library implements a small web service that authenticates one user
//! against the Spotify Web API, builds a personalized discovery playlist
//! from their short-term listening history, and keeps that playlist fresh
//! with a recurring background refresh job.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (login, OAuth callback, playlist generation)
//! - `config` - Configuration management and environment variables
//! - `error` - Typed error taxonomy for token and sync failures
//! - `management` - Token lifecycle, playlist reconcile, refresh scheduling
//! - `server` - The axum HTTP server and shared application state
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Seed assembly and small helpers

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Scheduling refresh every {} minutes", minutes);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Playlist refreshed: {} added", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1 and should only be
/// used for fatal errors where recovery is not possible (bad configuration,
/// unusable listen address).
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues (transient provider failures, skipped
/// tracks) that users should notice but that don't stop the service.
///
/// # Example
///
/// ```
/// warning!("No search match for '{}'; skipping", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
