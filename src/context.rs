//! Shared application context.
//!
//! DESIGN
//! ======
//! The production client reached its auth and loading state through
//! module-level singletons; here the same single-instance semantics live in
//! one explicit `AppContext` built at startup and handed to the router and
//! request layer. Lifecycle is init-on-startup, no teardown.

use std::sync::Arc;

use crate::api::auth::AuthBackend;
use crate::api::client::ApiClient;
use crate::config::CoreConfig;
use crate::credentials::CredentialStore;
use crate::fault::FaultInterceptor;
use crate::guard::NavigationGuard;
use crate::loading::LoadingSignal;
use crate::routes::Router;
use crate::session::LoginSession;

/// Process-wide wiring of the coordination core. Clone is cheap; all
/// clones share the same underlying state.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<LoginSession>,
    pub loading: LoadingSignal,
    pub guard: Arc<NavigationGuard>,
    pub faults: Arc<FaultInterceptor>,
    pub api: ApiClient,
}

impl AppContext {
    /// Wire the core against the host-provided collaborators.
    #[must_use]
    pub fn new(
        config: &CoreConfig,
        store: Arc<dyn CredentialStore>,
        backend: Arc<dyn AuthBackend>,
        router: Arc<dyn Router>,
    ) -> Self {
        let loading = LoadingSignal::new();
        let session = Arc::new(LoginSession::new(store, backend, config.credential_ttl));
        let guard = Arc::new(NavigationGuard::new(
            Arc::clone(&session),
            loading.clone(),
            config.min_visible,
        ));
        let faults = Arc::new(FaultInterceptor::new(loading.clone(), router));
        let api = ApiClient::new(&config.api_base_url, loading.clone(), Arc::clone(&faults));
        Self { session, loading, guard, faults, api }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
