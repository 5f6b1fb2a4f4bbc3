//! Login session — one-shot auth resolution and identity queries.
//!
//! DESIGN
//! ======
//! The persisted-credential lookup runs at most once per process lifetime,
//! no matter how many navigations race into it: `resolve()` is a
//! single-flight `OnceCell` init, so concurrent callers all await the same
//! in-flight lookup and observe the same outcome.
//!
//! ERROR HANDLING
//! ==============
//! Resolution fails closed. A missing token, a rejected token, or a network
//! error during verification all end the same way: no identity, session
//! resolved. The guard then treats the user as signed out; nothing here is
//! ever fatal.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::api::auth::{AuthBackend, AuthError, Identity};
use crate::credentials::CredentialStore;
use crate::routes::Route;

pub struct LoginSession {
    store: Arc<dyn CredentialStore>,
    backend: Arc<dyn AuthBackend>,
    credential_ttl: Duration,
    resolve_once: OnceCell<()>,
    identity: RwLock<Option<Identity>>,
}

impl LoginSession {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, backend: Arc<dyn AuthBackend>, credential_ttl: Duration) -> Self {
        Self { store, backend, credential_ttl, resolve_once: OnceCell::new(), identity: RwLock::new(None) }
    }

    /// Resolve the persisted login state. Idempotent and single-flight:
    /// the first caller performs the lookup, concurrent callers await it,
    /// and every later call returns immediately.
    pub async fn resolve(&self) {
        self.resolve_once
            .get_or_init(|| async {
                match self.store.get().await {
                    Some(token) => match self.backend.verify(&token).await {
                        Ok(Some(identity)) => {
                            info!(user = %identity.username, "login session restored");
                            self.set_identity(Some(identity));
                        }
                        Ok(None) => debug!("stored token rejected; resolving unauthenticated"),
                        Err(err) => warn!(error = %err, "login resolution failed; resolving unauthenticated"),
                    },
                    None => debug!("no stored credential; resolving unauthenticated"),
                }
            })
            .await;
    }

    /// Whether the one-shot resolution has completed.
    #[must_use]
    pub fn resolved(&self) -> bool {
        self.resolve_once.initialized()
    }

    /// Sign in. On success the identity is set and the token persisted for
    /// the configured TTL; on failure state is untouched and the error is
    /// the caller's to surface.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        match self.backend.login(email, password).await {
            Ok(resp) => {
                self.store.set(&resp.token, self.credential_ttl).await;
                self.set_identity(Some(resp.user.clone()));
                info!(user = %resp.user.username, "logged in");
                Ok(resp.user)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                Err(err)
            }
        }
    }

    /// Sign out: clears the identity now and the persisted credential in
    /// the background. The session stays resolved; logging out is not
    /// un-resolving. Returns the route the shell should land on.
    pub fn logout(&self) -> Route {
        self.set_identity(None);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move { store.clear().await });
        info!("logged out");
        Route::Articles
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_identity(&self, identity: Option<Identity>) {
        let mut slot = self.identity.write().unwrap_or_else(PoisonError::into_inner);
        *slot = identity;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
