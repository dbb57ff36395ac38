use serde::{Deserialize, Serialize};

/// The single process-wide bearer credential. Created by the authorization
/// code exchange, mutated in place by refresh, never dropped while the
/// process lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Credential {
    pub fn from_token_response(response: TokenResponse) -> Self {
        Credential {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in.unwrap_or(3600),
            obtained_at: chrono::Utc::now().timestamp() as u64,
        }
    }

    /// Applies a refresh response in place: the access token is replaced,
    /// the refresh token only if the provider rotated it, and the obtained
    /// timestamp is reset.
    pub fn apply_refresh(&mut self, response: TokenResponse) {
        self.access_token = response.access_token;
        if response.refresh_token.is_some() {
            self.refresh_token = response.refresh_token;
        }
        self.expires_in = response.expires_in.unwrap_or(self.expires_in);
        self.obtained_at = chrono::Utc::now().timestamp() as u64;
    }
}

/// Body of a 2xx answer from the token endpoint, for both the
/// `authorization_code` and the `refresh_token` grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub country: Option<String>,
}

/// One entry of `/me/top/artists` or `/me/top/tracks`. Only id and name are
/// ever used, as seed material and for the playlist description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItemsResponse {
    pub items: Vec<TopItem>,
}

/// Seed material for one recommendation request. Regenerated every cycle,
/// never persisted.
#[derive(Debug, Clone)]
pub struct RecommendationSeed {
    pub artist_ids: Vec<String>,
    pub track_ids: Vec<String>,
    pub market: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<RecommendedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTrack {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
}

/// `track` is null for local or since-removed entries; those are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(access: &str, refresh: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
            expires_in: Some(3600),
            scope: None,
        }
    }

    #[test]
    fn test_apply_refresh_replaces_access_token() {
        let mut credential = Credential::from_token_response(response("old", Some("keep-me")));
        credential.apply_refresh(response("new", None));
        assert_eq!(credential.access_token, "new");
        // Provider did not rotate the refresh token, the old one survives.
        assert_eq!(credential.refresh_token.as_deref(), Some("keep-me"));
    }

    #[test]
    fn test_apply_refresh_rotates_refresh_token() {
        let mut credential = Credential::from_token_response(response("old", Some("stale")));
        credential.apply_refresh(response("new", Some("rotated")));
        assert_eq!(credential.refresh_token.as_deref(), Some("rotated"));
    }
}
