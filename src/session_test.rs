use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::context::test_helpers::{MockAuthBackend, dummy_identity};
use crate::credentials::MemoryCredentialStore;

const TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

// =============================================================================
// RESOLUTION
// =============================================================================

#[tokio::test]
async fn resolve_without_stored_token_is_unauthenticated() {
    let store = Arc::new(MemoryCredentialStore::new());
    let backend = Arc::new(MockAuthBackend::default());
    let session = LoginSession::new(store, Arc::clone(&backend) as Arc<dyn AuthBackend>, TTL);

    assert!(!session.resolved());
    session.resolve().await;
    assert!(session.resolved());
    assert!(!session.is_authenticated());
    assert_eq!(backend.verify_call_count(), 0, "no token, no lookup");
}

#[tokio::test]
async fn resolve_restores_identity_from_stored_token() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set("tok-1", TTL).await;
    let backend = Arc::new(MockAuthBackend { identity: Some(dummy_identity()), ..MockAuthBackend::default() });
    let session = LoginSession::new(store, Arc::clone(&backend) as Arc<dyn AuthBackend>, TTL);

    session.resolve().await;
    assert!(session.resolved());
    assert!(session.is_authenticated());
    assert_eq!(session.identity().unwrap().username, "kai");
}

#[tokio::test]
async fn resolve_fails_closed_on_backend_error() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set("tok-1", TTL).await;
    let backend = Arc::new(MockAuthBackend {
        identity: Some(dummy_identity()),
        verify_fails: true,
        ..MockAuthBackend::default()
    });
    let session = LoginSession::new(store, Arc::clone(&backend) as Arc<dyn AuthBackend>, TTL);

    session.resolve().await;
    assert!(session.resolved(), "errors still resolve the session");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set("tok-1", TTL).await;
    let backend = Arc::new(MockAuthBackend { identity: Some(dummy_identity()), ..MockAuthBackend::default() });
    let session = LoginSession::new(store, Arc::clone(&backend) as Arc<dyn AuthBackend>, TTL);

    session.resolve().await;
    session.resolve().await;
    session.resolve().await;
    assert_eq!(backend.verify_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_resolves_share_one_lookup() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set("tok-1", TTL).await;
    let backend = Arc::new(MockAuthBackend {
        identity: Some(dummy_identity()),
        verify_delay: Some(Duration::from_millis(200)),
        ..MockAuthBackend::default()
    });
    let session = Arc::new(LoginSession::new(
        store,
        Arc::clone(&backend) as Arc<dyn AuthBackend>,
        TTL,
    ));

    // Both callers start before the lookup settles.
    let a = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.resolve().await }
    });
    let b = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.resolve().await }
    });
    a.await.unwrap();
    b.await.unwrap();

    assert_eq!(backend.verify_call_count(), 1, "single-flight lookup");
    assert!(session.is_authenticated());
}

// =============================================================================
// LOGIN / LOGOUT
// =============================================================================

#[tokio::test]
async fn login_success_sets_identity_and_persists_token() {
    let store = Arc::new(MemoryCredentialStore::new());
    let backend = Arc::new(MockAuthBackend {
        identity: Some(dummy_identity()),
        login_token: Some("tok-9".into()),
        ..MockAuthBackend::default()
    });
    let session = LoginSession::new(
        Arc::clone(&store) as Arc<dyn crate::credentials::CredentialStore>,
        backend,
        TTL,
    );

    let user = session.login("kai@example.com", "hunter2").await.unwrap();
    assert_eq!(user.id, 7);
    assert!(session.is_authenticated());
    assert_eq!(store.get().await.as_deref(), Some("tok-9"));
}

#[tokio::test]
async fn login_failure_leaves_state_unchanged() {
    let store = Arc::new(MemoryCredentialStore::new());
    let backend = Arc::new(MockAuthBackend::default()); // no login_token: always rejects
    let session = LoginSession::new(
        Arc::clone(&store) as Arc<dyn crate::credentials::CredentialStore>,
        backend,
        TTL,
    );

    let err = session.login("kai@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, AuthError::Status { status: 401, .. }));
    assert!(!session.is_authenticated());
    assert_eq!(store.get().await, None);
}

#[tokio::test]
async fn logout_clears_identity_but_stays_resolved() {
    let store = Arc::new(MemoryCredentialStore::new());
    store.set("tok-1", TTL).await;
    let backend = Arc::new(MockAuthBackend { identity: Some(dummy_identity()), ..MockAuthBackend::default() });
    let session = LoginSession::new(
        Arc::clone(&store) as Arc<dyn crate::credentials::CredentialStore>,
        backend,
        TTL,
    );

    session.resolve().await;
    assert!(session.is_authenticated());

    let landing = session.logout();
    assert_eq!(landing, Route::Articles);
    assert!(!session.is_authenticated());
    assert!(session.resolved(), "logout never un-resolves");

    // Background credential clear settles.
    tokio::task::yield_now().await;
    assert_eq!(store.get().await, None);
}
