use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::models::token::{CachedCredential, IssuedToken};
use crate::error::AppError;

/// Performs one client-credentials exchange against a token issuer.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn exchange(&self) -> Result<IssuedToken, AppError>;
}

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Holds at most one bearer token and refreshes it on demand.
///
/// The check, exchange and store steps run while holding the slot lock, so
/// callers arriving during an exchange wait for it and reuse its token
/// instead of starting their own.
pub struct TokenCache {
    exchange: Arc<dyn CredentialExchange>,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CachedCredential>>,
}

impl TokenCache {
    pub fn new(exchange: Arc<dyn CredentialExchange>) -> Self {
        Self::with_clock(exchange, Arc::new(SystemClock))
    }

    pub fn with_clock(exchange: Arc<dyn CredentialExchange>, clock: Arc<dyn Clock>) -> Self {
        Self {
            exchange,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Returns a token that stays valid for at least another minute,
    /// exchanging credentials only when the cached one is missing or stale.
    ///
    /// A failed exchange leaves the cached credential untouched.
    pub async fn get_token(&self) -> Result<String, AppError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_usable_at(self.clock.now_millis()) {
                debug!(expires_at = cached.expires_at, "reusing cached access token");
                return Ok(cached.token.clone());
            }
        }

        let issued = self.exchange.exchange().await.inspect_err(|e| {
            warn!(error = %e, "credential exchange failed");
        })?;

        if issued.access_token.is_empty() {
            return Err(AppError::CredentialExchange(
                "token endpoint returned an empty access_token".into(),
            ));
        }

        let credential = CachedCredential::issued_at(issued, self.clock.now_millis());
        info!(expires_at = credential.expires_at, "access token refreshed");

        let token = credential.token.clone();
        *slot = Some(credential);
        Ok(token)
    }

    /// Snapshot of the cached credential, if any.
    pub async fn current(&self) -> Option<CachedCredential> {
        self.slot.lock().await.clone()
    }
}
