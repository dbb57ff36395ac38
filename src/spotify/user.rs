use reqwest::Client;

use crate::{
    config,
    error::Result,
    spotify::ensure_authorized,
    types::{TopItem, TopItemsResponse, UserProfile},
};

/// Fetches the authenticated user's profile from `/me`.
///
/// This is the cheapest authenticated call the provider offers, so the token
/// manager also uses it as the validity probe before privileged operations.
/// Besides the user id it carries the account's `country`, which feeds the
/// recommendation request as the market code.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns the [`UserProfile`] on success. A 401 maps to
/// `SyncError::CredentialInvalid` and is handled by the token manager only.
pub async fn get_profile(token: &str) -> Result<UserProfile> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let response = ensure_authorized(response)?;

    Ok(response.json::<UserProfile>().await?)
}

/// Retrieves the user's short-term top artists.
///
/// Queries `/me/top/artists` with `time_range=short_term`. The offset shifts
/// the window into the user's top 50 so successive sync cycles draw
/// different seed material.
pub async fn get_top_artists(token: &str, limit: usize, offset: u32) -> Result<Vec<TopItem>> {
    get_top_items(token, "artists", limit, offset).await
}

/// Retrieves the user's short-term top tracks. Same shape as
/// [`get_top_artists`], against `/me/top/tracks`.
pub async fn get_top_tracks(token: &str, limit: usize, offset: u32) -> Result<Vec<TopItem>> {
    get_top_items(token, "tracks", limit, offset).await
}

async fn get_top_items(
    token: &str,
    kind: &str,
    limit: usize,
    offset: u32,
) -> Result<Vec<TopItem>> {
    let api_url = format!(
        "{uri}/me/top/{kind}?time_range=short_term&limit={limit}&offset={offset}",
        uri = &config::spotify_apiurl(),
        kind = kind,
        limit = limit,
        offset = offset
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let response = ensure_authorized(response)?;

    let res = response.json::<TopItemsResponse>().await?;
    Ok(res.items)
}
