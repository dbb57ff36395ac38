use std::sync::Arc;

use axum::{Extension, response::Html};
use tokio::sync::Mutex;

use crate::{
    config,
    error::SyncError,
    management::{PlaylistSyncer, schedule_refresh},
    server::AppState,
    warning,
};

/// Builds the discovery playlist and registers the recurring refresh job.
///
/// This is the one interactive entry point into the sync core: it runs the
/// initial creation with the configured playlist name and visibility, then
/// binds one refresh job to the created target at the configured interval.
/// Re-invoking it cancels the previous job and starts over with a freshly
/// created playlist target.
pub async fn generate(Extension(state): Extension<AppState>) -> Html<String> {
    // Probe the session up front so a missing or stale login fails fast,
    // before any playlist work starts.
    if let Err(e) = state.tokens.get_valid_token().await {
        return match e {
            SyncError::AuthExpired => {
                Html("<h4>Not logged in. Visit /login first.</h4>".to_string())
            }
            e => {
                warning!("Session probe failed: {}", e);
                Html(format!("<h4>Playlist generation failed: {}</h4>", e))
            }
        };
    }

    let syncer = PlaylistSyncer::new(config::playlist_name(), config::playlist_public());

    match syncer.create(&state.tokens).await {
        Ok((target, report)) => {
            let interval = config::refresh_interval();
            let playlist_name = target.playlist_name.clone();

            let tokens = Arc::clone(&state.tokens);
            let syncer = Arc::new(syncer);
            let target = Arc::new(Mutex::new(target));
            let handle = schedule_refresh(interval, move || {
                let tokens = Arc::clone(&tokens);
                let syncer = Arc::clone(&syncer);
                let target = Arc::clone(&target);
                async move {
                    let mut target = target.lock().await;
                    syncer.refresh(&tokens, &mut target).await
                }
            });

            let mut job = state.job.lock().await;
            if let Some(previous) = job.replace(handle) {
                previous.cancel();
            }

            Html(format!(
                "<h2>Playlist '{}' is ready.</h2>\
                 <p>{} tracks added. It will refresh every {} minutes.</p>",
                playlist_name,
                report.added,
                interval.as_secs() / 60
            ))
        }
        Err(SyncError::AuthExpired) => {
            Html("<h4>Not logged in. Visit /login first.</h4>".to_string())
        }
        Err(e) => {
            warning!("Playlist generation failed: {}", e);
            Html(format!("<h4>Playlist generation failed: {}</h4>", e))
        }
    }
}
