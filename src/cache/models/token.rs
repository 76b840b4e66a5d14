/// Tokens are treated as expired this long before the issuer says they are.
pub const EXPIRY_MARGIN_MS: i64 = 60_000;

/// Lifetime assumed when the issuer does not send `expires_in`.
pub const DEFAULT_LIFETIME_SECS: u64 = 3600;

/// The bearer token currently held by a [`TokenCache`](crate::cache::TokenCache).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedCredential {
    pub token: String,
    pub expires_at: i64, // Unix timestamp, milliseconds
}

impl CachedCredential {
    /// Builds a credential from an issued token, stamping the expiry relative to `now_ms`.
    pub fn issued_at(issued: IssuedToken, now_ms: i64) -> Self {
        let lifetime_secs = issued.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS);
        let lifetime_ms = i64::try_from(lifetime_secs)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000);

        Self {
            token: issued.access_token,
            expires_at: now_ms.saturating_add(lifetime_ms),
        }
    }

    pub fn is_usable_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at - EXPIRY_MARGIN_MS
    }
}

/// Successful answer of a client-credentials exchange.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
}
