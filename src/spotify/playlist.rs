use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::{Result, SyncError},
    spotify::ensure_authorized,
    types::{
        AddTracksRequest, CreatePlaylistRequest, CreatePlaylistResponse, GetUserPlaylistsResponse,
        Playlist, PlaylistTracksResponse, RemoveTracksRequest, TrackUri,
    },
};

/// Looks up a playlist of the current user by name.
///
/// Scans the first page (50 entries) of `/me/playlists` and returns the first
/// playlist whose name matches exactly. The provider lists most recently
/// touched playlists first, so when duplicates exist the freshest one wins;
/// duplicates are otherwise not disambiguated.
///
/// # Returns
///
/// Returns `Ok(Some(Playlist))` on a match, `Ok(None)` when no playlist of
/// that name exists. Absence is not an error here; the caller decides whether
/// it means "create one" or "target destroyed".
pub async fn find_by_name(token: &str, name: &str) -> Result<Option<Playlist>> {
    let api_url = format!(
        "{uri}/me/playlists?limit=50",
        uri = &config::spotify_apiurl()
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let response = ensure_authorized(response)?;

    let res = response.json::<GetUserPlaylistsResponse>().await?;
    Ok(res.items.into_iter().find(|p| p.name == name))
}

/// Creates a playlist for the given user.
///
/// Issues `POST /users/{user_id}/playlists` with the configured visibility
/// and a description summarizing the seed material of the first build.
pub async fn create(
    token: &str,
    user_id: &str,
    name: &str,
    description: &str,
    public: bool,
) -> Result<CreatePlaylistResponse> {
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = &config::spotify_apiurl(),
        user_id = user_id
    );

    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: description.to_string(),
        public,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    let response = ensure_authorized(response)?;

    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Fetches the URIs of all tracks currently on a playlist.
///
/// A 404 here means the playlist was deleted underneath us and maps to
/// [`SyncError::TargetNotFound`], which is terminal for the refresh job.
/// Entries without a track object (local files, withdrawn tracks) are
/// skipped.
pub async fn get_track_uris(token: &str, playlist_id: &str) -> Result<Vec<String>> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks?limit=100",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Err(SyncError::TargetNotFound(playlist_id.to_string()));
    }
    let response = ensure_authorized(response)?;

    let res = response.json::<PlaylistTracksResponse>().await?;
    Ok(res
        .items
        .into_iter()
        .filter_map(|item| item.track.map(|t| t.uri))
        .collect())
}

/// Removes the given track URIs from a playlist.
///
/// Used by the clear step of the clear-then-fill reconcile. An empty URI
/// list is a no-op and issues no request.
pub async fn remove_tracks(token: &str, playlist_id: &str, uris: &[String]) -> Result<()> {
    if uris.is_empty() {
        return Ok(());
    }

    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let body = RemoveTracksRequest {
        tracks: uris
            .iter()
            .map(|uri| TrackUri { uri: uri.clone() })
            .collect(),
    };

    let client = Client::new();
    let response = client
        .delete(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Err(SyncError::TargetNotFound(playlist_id.to_string()));
    }
    ensure_authorized(response)?;

    Ok(())
}

/// Appends the given track URIs to a playlist in one batch call.
pub async fn add_tracks(token: &str, playlist_id: &str, uris: Vec<String>) -> Result<()> {
    if uris.is_empty() {
        return Ok(());
    }

    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = &config::spotify_apiurl(),
        playlist_id = playlist_id
    );

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&AddTracksRequest { uris })
        .send()
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Err(SyncError::TargetNotFound(playlist_id.to_string()));
    }
    ensure_authorized(response)?;

    Ok(())
}
