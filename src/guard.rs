//! Navigation guard — auth gating and busy-window bracketing.
//!
//! DESIGN
//! ======
//! Every navigation attempt flows through `before_each`: first the session
//! resolves (an await only the very first navigation actually pays; the
//! session's single-flight cell makes every later call immediate), then the
//! destination's static policy is applied, and only a permitted transition
//! opens the busy window. `after_each` fires once the destination view is
//! mounted and starts the minimum-visible countdown.
//!
//! Overlapping navigations are safe without a lock here: both may await
//! `resolve()`, but the session guarantees a single underlying lookup, and
//! the loading signal's operations are idempotent under re-entry.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::loading::LoadingSignal;
use crate::routes::{GuardDecision, Route};
use crate::session::LoginSession;

pub struct NavigationGuard {
    session: Arc<LoginSession>,
    loading: LoadingSignal,
    min_visible: Duration,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(session: Arc<LoginSession>, loading: LoadingSignal, min_visible: Duration) -> Self {
        Self { session, loading, min_visible }
    }

    /// Evaluate a navigation attempt to `to`. Must reach a decision before
    /// the router commits the transition.
    pub async fn before_each(&self, to: Route) -> GuardDecision {
        self.session.resolve().await;

        if to.requires_auth() && !self.session.is_authenticated() {
            debug!(route = ?to, "auth required; redirecting to login");
            return GuardDecision::Redirect(Route::Login);
        }
        if to.is_guest_only() && self.session.is_authenticated() {
            debug!(route = ?to, "already signed in; redirecting to articles");
            return GuardDecision::Redirect(Route::Articles);
        }

        // Open the busy window before the transition proceeds so the
        // indicator is up for the whole route change.
        self.loading.set_explicit(true);
        self.loading.arm_minimum_duration();
        GuardDecision::Proceed
    }

    /// Navigation-complete hook: the destination view is mounted, start the
    /// debounce countdown that eventually lets the indicator hide.
    pub fn after_each(&self) {
        self.loading.disarm_after_delay(self.min_visible);
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
