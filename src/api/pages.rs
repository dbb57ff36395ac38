use axum::{
    Extension,
    response::{Html, Redirect},
};

use crate::{server::AppState, spotify};

/// Landing page; tells the visitor whether a session is already held.
pub async fn index(Extension(state): Extension<AppState>) -> Html<String> {
    let hint = if state.tokens.has_session().await {
        "You are logged in. POST to /generate to build your discovery playlist."
    } else {
        "<a href=\"/login\">Log in with Spotify</a>, then POST to /generate \
         to build your discovery playlist."
    };
    Html(format!("<h2>SpotDiscover</h2><p>{}</p>", hint))
}

/// Redirects the browser to the Spotify authorization page.
pub async fn login(Extension(state): Extension<AppState>) -> Redirect {
    Redirect::temporary(&spotify::auth::authorize_url(&state.oauth_state))
}
