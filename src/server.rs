use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, config, error, management::{JobHandle, TokenManager}, utils};

/// Shared state handed to every request handler.
///
/// One user session per running instance: one token manager, at most one
/// scheduled refresh job, one OAuth state nonce per server start.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub job: Arc<Mutex<Option<JobHandle>>>,
    pub oauth_state: Arc<String>,
}

impl AppState {
    pub fn new(tokens: TokenManager) -> Self {
        AppState {
            tokens: Arc::new(tokens),
            job: Arc::new(Mutex::new(None)),
            oauth_state: Arc::new(utils::generate_state_nonce()),
        }
    }
}

pub async fn start_api_server(state: AppState) {
    let app = Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/generate", post(api::generate))
        .route("/health", get(api::health))
        .layer(Extension(state));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
