//! Route table, per-route authorization policy, and the router seam.
//!
//! DESIGN
//! ======
//! The policy is static: each route either requires an authenticated user,
//! is guest-only (login/register redirect signed-in users away), or is open.
//! The guard evaluates it read-only; nothing mutates policy at runtime.

use serde::{Deserialize, Serialize};

/// Every navigable route in the client, by identifier. Route parameters
/// (article ids, user emails) are a view concern and carried elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Register,
    Help,
    Explore,
    Articles,
    Article,
    Gallery,
    CreatePhotoPost,
    PhotoPost,
    EditPhotoPost,
    Community,
    CommunityPost,
    CommunityCreatePost,
    EditCommunityPost,
    CreatePostPreview,
    CreateVote,
    Vote,
    PersonalInfo,
    PersonalPosts,
    Error,
    NotFound,
}

impl Route {
    /// Whether the route may only be entered by an authenticated user.
    ///
    /// `EditCommunityPost` is intentionally absent: the production route
    /// table never flagged it, and the policy here mirrors it exactly.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            Route::Community
                | Route::CommunityPost
                | Route::CommunityCreatePost
                | Route::CreatePostPreview
                | Route::CreateVote
                | Route::Vote
                | Route::PersonalInfo
                | Route::PersonalPosts
        )
    }

    /// Whether the route only makes sense for signed-out users.
    #[must_use]
    pub fn is_guest_only(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// The guard's answer to a navigation-attempt event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Commit the transition to the requested route.
    Proceed,
    /// Abandon the requested route and go here instead.
    Redirect(Route),
}

/// Router collaborator implemented by the host shell.
///
/// The shell emits navigation-attempt events into [`crate::NavigationGuard`]
/// and applies the returned [`GuardDecision`]; this trait is the reverse
/// direction, used when the core itself must move the app (fault redirects).
pub trait Router: Send + Sync {
    /// The currently mounted route.
    fn current(&self) -> Route;

    /// Replace the current route without a new history entry.
    fn replace(&self, to: Route);
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
