use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::AppState, spotify, success, warning};

/// OAuth callback handler.
///
/// Verifies the state nonce against the one issued at `/login`, exchanges
/// the authorization code for the initial token pair and installs it as the
/// process-wide credential. The resulting page is plain feedback for the
/// user's browser window.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Html<&'static str> {
    if params.get("state").map(String::as_str) != Some(state.oauth_state.as_str()) {
        return Html("<h4>State mismatch. Please restart the login flow.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match spotify::auth::exchange_code(code).await {
        Ok(credential) => {
            state.tokens.install(credential).await;
            success!("Authentication successful");
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
