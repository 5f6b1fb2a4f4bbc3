//! Persisted-credential seam: a scoped, expiring token slot.
//!
//! DESIGN
//! ======
//! The production client keeps the auth token in a cookie with a 7-day
//! expiry. The core only needs a get/set/clear slot with TTL semantics, so
//! the seam is that narrow; `MemoryCredentialStore` is the in-process
//! implementation used by tests and non-browser hosts.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Durable client-side slot for the auth token.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored token, or `None` if absent or expired.
    async fn get(&self) -> Option<String>;

    /// Store a token, replacing any previous one, valid for `ttl`.
    async fn set(&self, token: &str, ttl: Duration);

    /// Remove the stored token.
    async fn clear(&self);
}

struct Slot {
    token: String,
    expires_at: Instant,
}

/// In-process [`CredentialStore`] with `Instant`-based expiry.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Slot>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get_at(&self, now: Instant) -> Option<String> {
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match slot.as_ref() {
            Some(s) if s.expires_at > now => Some(s.token.clone()),
            Some(_) => {
                // Expired: drop it so later reads are cheap.
                *slot = None;
                None
            }
            None => None,
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Option<String> {
        self.get_at(Instant::now())
    }

    async fn set(&self, token: &str, ttl: Duration) {
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(Slot { token: token.to_owned(), expires_at: Instant::now() + ttl });
    }

    async fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
