use rand::{Rng, distr::Alphanumeric};

use crate::types::{RecommendationSeed, TopItem};

/// Maximum number of artist ids carried in one recommendation seed.
pub const SEED_ARTIST_LIMIT: usize = 2;

/// Maximum number of track ids carried in one recommendation seed.
pub const SEED_TRACK_LIMIT: usize = 3;

/// Upper bound (inclusive) for the randomized top-items offset.
pub const SEED_OFFSET_MAX: u32 = 50;

pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Picks a random offset into the user's top-50 items. Each refresh cycle
/// draws a fresh one so repeated syncs surface different seed material;
/// only the very first creation call uses offset 0 instead.
pub fn random_seed_offset() -> u32 {
    rand::rng().random_range(0..=SEED_OFFSET_MAX)
}

pub fn build_seed(
    artists: &[TopItem],
    tracks: &[TopItem],
    market: Option<String>,
) -> RecommendationSeed {
    RecommendationSeed {
        artist_ids: artists
            .iter()
            .take(SEED_ARTIST_LIMIT)
            .map(|a| a.id.clone())
            .collect(),
        track_ids: tracks
            .iter()
            .take(SEED_TRACK_LIMIT)
            .map(|t| t.id.clone())
            .collect(),
        market,
    }
}

/// Builds the playlist description from the seed material, e.g.
/// "Fresh picks seeded by Artist A, Artist B and Track X, Track Y".
pub fn summarize_seeds(artists: &[TopItem], tracks: &[TopItem]) -> String {
    let artist_names = artists
        .iter()
        .take(SEED_ARTIST_LIMIT)
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let track_names = tracks
        .iter()
        .take(SEED_TRACK_LIMIT)
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match (artist_names.is_empty(), track_names.is_empty()) {
        (false, false) => format!("Fresh picks seeded by {} and {}", artist_names, track_names),
        (false, true) => format!("Fresh picks seeded by {}", artist_names),
        (true, false) => format!("Fresh picks seeded by {}", track_names),
        (true, true) => "Fresh picks from your listening history".to_string(),
    }
}
