//! Cached OAuth2 bearer token for a provider.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::ProviderError;

/// Seconds before the provider's stated expiry at which a token is dropped.
pub const EXPIRY_MARGIN_SECS: u64 = 300;

/// A token as returned by an OAuth2 client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchedToken {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// A single bearer token with its expiry.
///
/// Concurrent callers that all find the cache stale each fetch a token; the
/// last writer wins.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token if it is still fresh.
    pub async fn current(&self) -> Option<String> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|cached| Instant::now() < cached.expires_at)
            .map(|cached| cached.token.clone())
    }

    /// Return the cached token, calling `fetch` once when it is missing or
    /// stale.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<String, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FetchedToken, ProviderError>>,
    {
        if let Some(token) = self.current().await {
            return Ok(token);
        }

        let fetched = fetch().await?;
        let lifetime = Duration::from_secs(fetched.expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        debug!(expires_in = fetched.expires_in, "Provider token refreshed");

        let mut guard = self.inner.write().await;
        *guard = Some(CachedToken {
            token: fetched.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(fetched.access_token)
    }

    /// Forget the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
    }
}
