use spotdiscover::types::TopItem;
use spotdiscover::utils::*;

// Helper function to create a test top item
fn create_top_item(id: &str, name: &str) -> TopItem {
    TopItem {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn test_generate_state_nonce() {
    let nonce = generate_state_nonce();

    // Should be exactly 32 characters
    assert_eq!(nonce.len(), 32);

    // Should contain only alphanumeric characters
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated nonces should be different
    let nonce2 = generate_state_nonce();
    assert_ne!(nonce, nonce2);
}

#[test]
fn test_random_seed_offset_stays_in_range() {
    for _ in 0..500 {
        let offset = random_seed_offset();
        assert!(offset <= SEED_OFFSET_MAX);
    }
}

#[test]
fn test_random_seed_offset_varies() {
    // 500 draws from 0..=50 landing on one value is practically impossible
    let first = random_seed_offset();
    let varied = (0..500).any(|_| random_seed_offset() != first);
    assert!(varied);
}

#[test]
fn test_build_seed_caps_artists_and_tracks() {
    let artists: Vec<TopItem> = (0..5)
        .map(|i| create_top_item(&format!("a{}", i), &format!("Artist {}", i)))
        .collect();
    let tracks: Vec<TopItem> = (0..5)
        .map(|i| create_top_item(&format!("t{}", i), &format!("Track {}", i)))
        .collect();

    let seed = build_seed(&artists, &tracks, Some("US".to_string()));

    // Caps at 2 artists and 3 tracks, preserving provider order
    assert_eq!(seed.artist_ids, vec!["a0", "a1"]);
    assert_eq!(seed.track_ids, vec!["t0", "t1", "t2"]);
    assert_eq!(seed.market.as_deref(), Some("US"));
}

#[test]
fn test_build_seed_with_fewer_items_than_cap() {
    let artists = vec![create_top_item("a0", "Artist 0")];
    let tracks: Vec<TopItem> = Vec::new();

    let seed = build_seed(&artists, &tracks, None);

    assert_eq!(seed.artist_ids, vec!["a0"]);
    assert!(seed.track_ids.is_empty());
    assert!(seed.market.is_none());
}

#[test]
fn test_summarize_seeds_with_both() {
    let artists = vec![
        create_top_item("a0", "Artist A"),
        create_top_item("a1", "Artist B"),
    ];
    let tracks = vec![
        create_top_item("t0", "Track X"),
        create_top_item("t1", "Track Y"),
    ];

    let description = summarize_seeds(&artists, &tracks);

    assert_eq!(
        description,
        "Fresh picks seeded by Artist A, Artist B and Track X, Track Y"
    );
}

#[test]
fn test_summarize_seeds_truncates_to_caps() {
    let artists: Vec<TopItem> = (0..4)
        .map(|i| create_top_item(&format!("a{}", i), &format!("Artist {}", i)))
        .collect();
    let tracks: Vec<TopItem> = Vec::new();

    let description = summarize_seeds(&artists, &tracks);

    // Only the seed artists (2) show up, not the whole top list
    assert_eq!(description, "Fresh picks seeded by Artist 0, Artist 1");
}

#[test]
fn test_summarize_seeds_empty() {
    let description = summarize_seeds(&[], &[]);
    assert_eq!(description, "Fresh picks from your listening history");
}
