use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    error::Result,
    spotify::ensure_authorized,
    types::{RecommendationSeed, RecommendationsResponse, SearchResponse},
    warning,
};

/// Requests track recommendations for the given seed material.
///
/// Queries `/recommendations` with up to 2 seed artists, up to 3 seed tracks
/// and the user's market code. The result is capped to `limit` (at most 30
/// per sync cycle) and reduced to track names; URI resolution is a separate
/// search step so a recommendation that is unavailable in the user's market
/// simply drops out later.
///
/// # Rate Limiting
///
/// The discovery endpoints are the chattiest part of a sync cycle, so a 429
/// response is honored here: a reasonable `Retry-After` delay is awaited and
/// the request retried once. A second 429, or an abnormal delay, surfaces as
/// a provider error.
pub async fn get_recommendations(
    token: &str,
    seed: &RecommendationSeed,
    limit: usize,
) -> Result<Vec<String>> {
    let api_url = format!("{}/recommendations", config::spotify_apiurl());
    let mut query = vec![
        ("seed_artists", seed.artist_ids.join(",")),
        ("seed_tracks", seed.track_ids.join(",")),
        ("limit", limit.to_string()),
    ];
    if let Some(market) = &seed.market {
        query.push(("market", market.clone()));
    }

    let response = get_with_retry_after(&api_url, &query, token).await?;
    let res = response.json::<RecommendationsResponse>().await?;

    Ok(res.tracks.into_iter().map(|t| t.name).collect())
}

/// Resolves a track name to a playable URI via `/search?type=track`.
///
/// Takes the first search hit. A name with zero results returns `Ok(None)`;
/// the caller logs and skips it, it is never an error (a miss on a single
/// name must not abort the sync).
pub async fn search_track_uri(token: &str, name: &str) -> Result<Option<String>> {
    let api_url = format!("{}/search", config::spotify_apiurl());
    let query = [
        ("q", name.to_string()),
        ("type", "track".to_string()),
        ("limit", "1".to_string()),
    ];

    let response = get_with_retry_after(&api_url, &query, token).await?;
    let res = response.json::<SearchResponse>().await?;

    Ok(res.tracks.items.into_iter().next().map(|t| t.uri))
}

/// GET with 429 handling: waits out a reasonable `Retry-After` at most once,
/// maps everything else through the usual status handling.
async fn get_with_retry_after(
    api_url: &str,
    query: &[(&str, String)],
    token: &str,
) -> Result<reqwest::Response> {
    let mut waited = false;
    loop {
        let client = Client::new();
        let response = client
            .get(api_url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            if let Some(delay) = retry_delay(retry_after, waited) {
                waited = true;
                sleep(delay).await;
                continue; // retry
            }
            if let Some(secs) = retry_after.filter(|&s| s > 120) {
                warning!(
                    "Retry after has reached an abnormal high of {} seconds.",
                    secs
                );
            }
        }

        return ensure_authorized(response);
    }
}

/// Decides whether a 429 is worth waiting out. At most one wait per request,
/// and never for a delay the provider stretched beyond 120 seconds.
fn retry_delay(retry_after: Option<u64>, already_waited: bool) -> Option<Duration> {
    match retry_after {
        Some(secs) if !already_waited && secs <= 120 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_waits_once_within_bounds() {
        assert_eq!(retry_delay(Some(30), false), Some(Duration::from_secs(30)));
        assert_eq!(retry_delay(Some(120), false), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_retry_delay_never_waits_twice() {
        assert_eq!(retry_delay(Some(1), true), None);
    }

    #[test]
    fn test_retry_delay_rejects_abnormal_and_missing_headers() {
        assert_eq!(retry_delay(Some(121), false), None);
        assert_eq!(retry_delay(None, false), None);
    }
}
