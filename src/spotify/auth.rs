use reqwest::Client;

use crate::{
    config,
    error::{Result, SyncError},
    spotify::ensure_authorized,
    types::{Credential, TokenResponse},
};

/// Builds the Spotify authorization URL the user is redirected to.
///
/// Uses the `code` response type of the OAuth 2.0 authorization-code flow.
/// The `state` nonce is generated per server start and verified again in the
/// callback handler to reject forged redirects.
pub fn authorize_url(state: &str) -> String {
    format!(
        "{auth_url}?response_type=code&client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}&state={state}",
        auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        scope = &config::spotify_scope(),
        redirect_uri = &config::spotify_redirect_uri(),
        state = state
    )
}

/// Exchanges an authorization code for the initial token pair.
///
/// Completes the OAuth 2.0 authorization-code flow. Client credentials are
/// sent as HTTP basic auth, the grant parameters as a form body, per the
/// token endpoint contract.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
///
/// # Returns
///
/// Returns the full [`Credential`] (access token, refresh token, expiry
/// estimate, obtained-at stamp) or a [`SyncError`] when the endpoint rejects
/// the code or answers without a usable access token.
///
/// # Security Note
///
/// The authorization code is single-use and expires quickly (typically 10
/// minutes). The exchange should happen immediately after the callback.
pub async fn exchange_code(code: &str) -> Result<Credential> {
    let client = Client::new();
    let response = client
        .post(&config::spotify_apitoken_url())
        .basic_auth(
            &config::spotify_client_id(),
            Some(&config::spotify_client_secret()),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &config::spotify_redirect_uri()),
        ])
        .send()
        .await?;

    let response = ensure_authorized(response)?;
    let token: TokenResponse = response.json().await?;
    if token.access_token.is_empty() {
        return Err(SyncError::EmptyAccessToken);
    }

    Ok(Credential::from_token_response(token))
}

/// Exchanges a refresh token for a new access token.
///
/// Uses the `refresh_token` grant with basic-auth client credentials. The
/// provider may or may not rotate the refresh token; the raw
/// [`TokenResponse`] is returned so the caller can apply it to the held
/// credential in place.
///
/// Callers other than the token manager have no business invoking this;
/// refresh decisions are centralized there.
pub async fn refresh(refresh_token: &str) -> Result<TokenResponse> {
    let client = Client::new();
    let response = client
        .post(&config::spotify_apitoken_url())
        .basic_auth(
            &config::spotify_client_id(),
            Some(&config::spotify_client_secret()),
        )
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    let response = ensure_authorized(response)?;
    let token: TokenResponse = response.json().await?;
    if token.access_token.is_empty() {
        return Err(SyncError::EmptyAccessToken);
    }

    Ok(token)
}
