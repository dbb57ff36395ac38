use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::{
    error::{Result, SyncError},
    spotify,
    types::Credential,
    warning,
};

/// Owns the process-wide [`Credential`] and guarantees callers a fresh
/// access token.
///
/// There is no proactive TTL countdown; the provider's expiry estimate is
/// not reliable enough to act on. Instead a 401 from the provider is the
/// sole expiry signal: validity is probed with a lightweight `/me` call and
/// operations gone stale mid-flight are refreshed and retried exactly once.
/// `CredentialInvalid` never leaves this type; callers see either a working
/// token or [`SyncError::AuthExpired`].
///
/// All refresh activity is serialized through the internal mutex, so two
/// concurrent callers hitting a stale token cannot double-refresh and
/// invalidate each other's tokens at the provider.
pub struct TokenManager {
    credential: Mutex<Option<Credential>>,
}

impl TokenManager {
    /// Creates a manager with no session. Every authorized call fails with
    /// `AuthExpired` until [`install`](Self::install) is invoked.
    pub fn new() -> Self {
        TokenManager {
            credential: Mutex::new(None),
        }
    }

    /// Loads a previously persisted credential from the local cache, so a
    /// restart does not force a fresh login.
    pub async fn load() -> Result<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path).await?;
        let credential: Credential = serde_json::from_str(&content)?;
        Ok(TokenManager {
            credential: Mutex::new(Some(credential)),
        })
    }

    /// Installs the credential produced by the authorization-code exchange
    /// and persists it. Replaces whatever session was held before.
    pub async fn install(&self, credential: Credential) {
        let mut guard = self.credential.lock().await;
        if let Err(e) = Self::persist(&credential).await {
            warning!("Failed to save token to cache: {}", e);
        }
        *guard = Some(credential);
    }

    pub async fn has_session(&self) -> bool {
        self.credential.lock().await.is_some()
    }

    /// Returns an access token that was just observed valid.
    ///
    /// Probes with `GET /me`; on 401 refreshes once and probes again. A
    /// second 401, a missing refresh token or a rejected refresh all
    /// surface as [`SyncError::AuthExpired`].
    pub async fn get_valid_token(&self) -> Result<String> {
        let token = self.current_access_token().await?;
        match spotify::user::get_profile(&token).await {
            Ok(_) => Ok(token),
            Err(SyncError::CredentialInvalid) => {
                let fresh = self.refresh_if_stale(&token).await?;
                match spotify::user::get_profile(&fresh).await {
                    Ok(_) => Ok(fresh),
                    Err(SyncError::CredentialInvalid) => Err(SyncError::AuthExpired),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Runs an operation with the current access token, transparently
    /// refreshing and retrying exactly once when the provider rejects the
    /// token mid-operation.
    pub async fn run_authorized<T, F, Fut>(&self, op: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let token = self.current_access_token().await?;
        match op(token.clone()).await {
            Err(SyncError::CredentialInvalid) => {
                let fresh = self.refresh_if_stale(&token).await?;
                match op(fresh).await {
                    Err(SyncError::CredentialInvalid) => Err(SyncError::AuthExpired),
                    other => other,
                }
            }
            other => other,
        }
    }

    async fn current_access_token(&self) -> Result<String> {
        let guard = self.credential.lock().await;
        guard
            .as_ref()
            .map(|c| c.access_token.clone())
            .ok_or(SyncError::AuthExpired)
    }

    /// Refreshes the held credential unless another caller already did.
    ///
    /// `stale` is the access token the caller saw rejected. If the held
    /// token differs by the time the lock is acquired, a concurrent refresh
    /// won the race and its result is reused instead of spending another
    /// refresh-token exchange.
    async fn refresh_if_stale(&self, stale: &str) -> Result<String> {
        let mut guard = self.credential.lock().await;
        let credential = guard.as_mut().ok_or(SyncError::AuthExpired)?;

        if credential.access_token != stale {
            return Ok(credential.access_token.clone());
        }

        let refresh_token = credential
            .refresh_token
            .clone()
            .ok_or(SyncError::AuthExpired)?;
        let response = spotify::auth::refresh(&refresh_token)
            .await
            .map_err(|_| SyncError::AuthExpired)?;

        credential.apply_refresh(response);
        if let Err(e) = Self::persist(credential).await {
            warning!("Failed to save refreshed token to cache: {}", e);
        }

        Ok(credential.access_token.clone())
    }

    async fn persist(credential: &Credential) -> Result<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credential)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotdiscover/cache/token.json");
        path
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn credential(access: &str, refresh: Option<&str>) -> Credential {
        Credential {
            access_token: access.to_string(),
            refresh_token: refresh.map(String::from),
            expires_in: 3600,
            obtained_at: 0,
        }
    }

    fn manager_with(access: &str, refresh: Option<&str>) -> TokenManager {
        TokenManager {
            credential: Mutex::new(Some(credential(access, refresh))),
        }
    }

    #[tokio::test]
    async fn run_authorized_without_session_never_calls_the_operation() {
        let manager = TokenManager::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let result = manager
            .run_authorized(move |_token| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;

        assert!(matches!(result, Err(SyncError::AuthExpired)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn run_authorized_calls_the_operation_once_on_success() {
        let manager = manager_with("valid", None);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let seen = manager
            .run_authorized(move |token| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(token)
                }
            })
            .await
            .unwrap();

        assert_eq!(seen, "valid");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn run_authorized_passes_other_errors_through_without_retry() {
        let manager = manager_with("valid", Some("refresh"));
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let result = manager
            .run_authorized(move |_token| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), SyncError>(SyncError::TargetNotFound("gone".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(SyncError::TargetNotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_token_without_refresh_token_is_auth_expired() {
        let manager = manager_with("stale", None);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let result = manager
            .run_authorized(move |_token| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), SyncError>(SyncError::CredentialInvalid)
                }
            })
            .await;

        assert!(matches!(result, Err(SyncError::AuthExpired)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_token_is_retried_once_with_the_refreshed_token() {
        let manager = manager_with("stale", Some("refresh"));
        let calls = Arc::new(AtomicUsize::new(0));

        // The operation's first call replaces the held credential before
        // reporting the rejection, standing in for a refresh that completed
        // elsewhere. The retry must observe the replacement instead of
        // spending another refresh-token exchange.
        let manager_ref = &manager;
        let counter = Arc::clone(&calls);
        let seen = manager
            .run_authorized(move |token| {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        *manager_ref.credential.lock().await =
                            Some(credential("fresh", Some("refresh")));
                        Err(SyncError::CredentialInvalid)
                    } else {
                        Ok(token)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(seen, "fresh");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn second_rejection_is_auth_expired_with_no_further_retry() {
        let manager = manager_with("stale", Some("refresh"));
        let calls = Arc::new(AtomicUsize::new(0));

        let manager_ref = &manager;
        let counter = Arc::clone(&calls);
        let result = manager
            .run_authorized(move |_token| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    *manager_ref.credential.lock().await =
                        Some(credential("fresh", Some("refresh")));
                    Err::<(), SyncError>(SyncError::CredentialInvalid)
                }
            })
            .await;

        assert!(matches!(result, Err(SyncError::AuthExpired)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn refresh_is_skipped_when_the_held_token_already_moved_on() {
        let manager = manager_with("fresh", None);

        // The caller saw "stale" rejected, but the held token differs by the
        // time the lock is taken. No refresh token is present, so reaching
        // the exchange would fail; returning "fresh" proves it was reused.
        let token = manager.refresh_if_stale("stale").await.unwrap();
        assert_eq!(token, "fresh");
    }

    #[tokio::test]
    async fn has_session_reflects_the_held_credential() {
        assert!(!TokenManager::new().has_session().await);
        assert!(manager_with("valid", None).has_session().await);
    }
}
