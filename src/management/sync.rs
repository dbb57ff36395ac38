use crate::{
    error::{Result, SyncError},
    info, spotify,
    types::{RecommendationSeed, TopItem},
    utils, warning,
};

use super::TokenManager;

/// Upper bound on recommendations requested per sync cycle.
pub const RECOMMENDATION_LIMIT: usize = 30;

/// The playlist a refresh job is bound to. `playlist_id` is resolved lazily
/// by name lookup and cached for subsequent cycles.
#[derive(Debug, Clone)]
pub struct SyncTarget {
    pub user_id: String,
    pub playlist_name: String,
    pub playlist_id: Option<String>,
}

/// Counts reported after a successful reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub removed: usize,
}

/// Builds the discovery playlist from the user's listening history and
/// reconciles it against the provider's copy.
///
/// Every cycle computes a fresh target set (top items -> recommendation
/// seeds -> recommended names -> searched URIs) and applies it with
/// clear-then-fill semantics: after a successful sync the playlist contains
/// exactly this cycle's resolved URIs, never a merge with what was there
/// before.
pub struct PlaylistSyncer {
    playlist_name: String,
    public: bool,
}

impl PlaylistSyncer {
    pub fn new(playlist_name: String, public: bool) -> Self {
        PlaylistSyncer {
            playlist_name,
            public,
        }
    }

    /// First-time build: creates the playlist and fills it.
    ///
    /// Resolves the user from the token, gathers seed material at offset 0
    /// (randomization only kicks in on refresh cycles), creates the playlist
    /// with the configured visibility and a description summarizing the
    /// seeds, then appends the resolved recommendation URIs in one batch.
    pub async fn create(&self, tokens: &TokenManager) -> Result<(SyncTarget, SyncReport)> {
        let profile = tokens
            .run_authorized(|token| async move { spotify::user::get_profile(&token).await })
            .await?;

        let (artists, tracks) = self.gather_top_items(tokens, 0).await?;
        let seed = utils::build_seed(&artists, &tracks, profile.country.clone());
        let uris = self.resolve_recommendations(tokens, &seed).await?;

        let description = utils::summarize_seeds(&artists, &tracks);
        let user_id = profile.id.clone();
        let created = tokens
            .run_authorized(|token| {
                let user_id = user_id.clone();
                let description = description.clone();
                async move {
                    spotify::playlist::create(
                        &token,
                        &user_id,
                        &self.playlist_name,
                        &description,
                        self.public,
                    )
                    .await
                }
            })
            .await?;

        let playlist_id = created.id.clone();
        tokens
            .run_authorized(|token| {
                let playlist_id = playlist_id.clone();
                let uris = uris.clone();
                async move { spotify::playlist::add_tracks(&token, &playlist_id, uris).await }
            })
            .await?;

        info!(
            "Playlist {} created with {} tracks",
            self.playlist_name,
            uris.len()
        );

        let target = SyncTarget {
            user_id: profile.id,
            playlist_name: self.playlist_name.clone(),
            playlist_id: Some(created.id),
        };
        let report = SyncReport {
            added: uris.len(),
            removed: 0,
        };
        Ok((target, report))
    }

    /// Recurring reconcile of an existing playlist.
    ///
    /// Resolves the playlist id by name if it is not cached yet; a playlist
    /// that can no longer be found is reported as
    /// [`SyncError::TargetNotFound`], which the scheduler treats as the
    /// terminal "target destroyed" signal rather than a retryable failure.
    /// Otherwise the current contents are removed wholesale and replaced by
    /// this cycle's resolved URI list.
    pub async fn refresh(&self, tokens: &TokenManager, target: &mut SyncTarget) -> Result<SyncReport> {
        let profile = tokens
            .run_authorized(|token| async move { spotify::user::get_profile(&token).await })
            .await?;
        target.user_id = profile.id;

        let playlist_id = match &target.playlist_id {
            Some(id) => id.clone(),
            None => {
                let playlist_name = target.playlist_name.clone();
                let found = tokens
                    .run_authorized(|token| {
                        let playlist_name = playlist_name.clone();
                        async move {
                            spotify::playlist::find_by_name(&token, &playlist_name).await
                        }
                    })
                    .await?;
                match found {
                    Some(playlist) => {
                        target.playlist_id = Some(playlist.id.clone());
                        playlist.id
                    }
                    None => return Err(SyncError::TargetNotFound(target.playlist_name.clone())),
                }
            }
        };

        let offset = utils::random_seed_offset();
        let (artists, tracks) = self.gather_top_items(tokens, offset).await?;
        let seed = utils::build_seed(&artists, &tracks, profile.country);
        let uris = self.resolve_recommendations(tokens, &seed).await?;

        let current = tokens
            .run_authorized(|token| {
                let playlist_id = playlist_id.clone();
                async move { spotify::playlist::get_track_uris(&token, &playlist_id).await }
            })
            .await
            .map_err(|e| self.map_destroyed(e, target))?;

        tokens
            .run_authorized(|token| {
                let playlist_id = playlist_id.clone();
                let current = current.clone();
                async move { spotify::playlist::remove_tracks(&token, &playlist_id, &current).await }
            })
            .await
            .map_err(|e| self.map_destroyed(e, target))?;

        tokens
            .run_authorized(|token| {
                let playlist_id = playlist_id.clone();
                let uris = uris.clone();
                async move { spotify::playlist::add_tracks(&token, &playlist_id, uris).await }
            })
            .await
            .map_err(|e| self.map_destroyed(e, target))?;

        Ok(SyncReport {
            added: uris.len(),
            removed: current.len(),
        })
    }

    async fn gather_top_items(
        &self,
        tokens: &TokenManager,
        offset: u32,
    ) -> Result<(Vec<TopItem>, Vec<TopItem>)> {
        let artists = tokens
            .run_authorized(|token| async move {
                spotify::user::get_top_artists(&token, utils::SEED_ARTIST_LIMIT, offset).await
            })
            .await?;
        let tracks = tokens
            .run_authorized(|token| async move {
                spotify::user::get_top_tracks(&token, utils::SEED_TRACK_LIMIT, offset).await
            })
            .await?;
        Ok((artists, tracks))
    }

    /// Turns recommended names into playable URIs via name search. A name
    /// with zero search hits is logged and dropped; partial resolution is
    /// never fatal, the sync proceeds with whatever resolved.
    async fn resolve_recommendations(
        &self,
        tokens: &TokenManager,
        seed: &RecommendationSeed,
    ) -> Result<Vec<String>> {
        let names = tokens
            .run_authorized(|token| async move {
                spotify::tracks::get_recommendations(&token, seed, RECOMMENDATION_LIMIT).await
            })
            .await?;

        let mut uris = Vec::with_capacity(names.len());
        for name in &names {
            let resolved = tokens
                .run_authorized(|token| async move {
                    spotify::tracks::search_track_uri(&token, name).await
                })
                .await?;
            match resolved {
                Some(uri) => uris.push(uri),
                None => warning!("No search match for recommended track '{}'; skipping", name),
            }
        }

        Ok(uris)
    }

    /// Reports the named playlist instead of the raw id when the target
    /// vanished mid-reconcile; the id alone means nothing in logs.
    fn map_destroyed(&self, err: SyncError, target: &SyncTarget) -> SyncError {
        match err {
            SyncError::TargetNotFound(_) => {
                SyncError::TargetNotFound(target.playlist_name.clone())
            }
            other => other,
        }
    }
}
