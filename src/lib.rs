//! Navigation & loading-visibility core for the Plaza media-sharing client.
//!
//! ARCHITECTURE
//! ============
//! The crate coordinates three process-wide concerns the host shell plugs
//! into: a one-shot login-state resolution (`session`), a debounced global
//! busy indicator (`loading`), and an auth-gated navigation guard (`guard`).
//! Unrecoverable faults from anywhere in the view tree funnel through
//! `fault`, which resets the busy indicator and drives a one-time redirect
//! to the error route.
//!
//! The host provides the collaborators: a `Router` (route events in, guard
//! decisions out), a `CredentialStore` (expiring token slot), and an
//! `AuthBackend` (verify/login against the REST API). `AppContext` wires
//! everything together once at startup.

pub mod api;
pub mod config;
pub mod context;
pub mod credentials;
pub mod fault;
pub mod guard;
pub mod loading;
pub mod routes;
pub mod session;

pub use api::auth::{AuthBackend, AuthError, HttpAuthBackend, Identity, LoginResponse};
pub use api::client::{ApiClient, ApiError};
pub use config::CoreConfig;
pub use context::AppContext;
pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use fault::{FaultInterceptor, FaultRecord};
pub use guard::NavigationGuard;
pub use loading::LoadingSignal;
pub use routes::{GuardDecision, Route, Router};
pub use session::LoginSession;

/// Install the process-wide tracing subscriber. Hosts call this once at
/// startup, before building the [`AppContext`].
pub fn init_tracing() {
    tracing_subscriber::fmt::init();
}
