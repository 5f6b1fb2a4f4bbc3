//! Auth backend capability — token verification, login, registration.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Http(String),
    #[error("auth backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected auth response: {0}")]
    Decode(String),
}

/// Resolved user identity as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub username: String,
}

/// Successful login payload: a bearer token plus the signed-in user.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

/// Remote auth capability consumed by [`crate::LoginSession`].
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Validate a stored token. `Ok(None)` means the token was rejected
    /// (expired or revoked), an unauthenticated outcome rather than a failure.
    async fn verify(&self, token: &str) -> Result<Option<Identity>, AuthError>;

    /// Exchange email + password for a token and identity.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// [`AuthBackend`] over the Plaza REST API.
pub struct HttpAuthBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Whether an account already exists for `email`
    /// (`GET /auth/user/checkEmail/{email}`).
    pub async fn check_email(&self, email: &str) -> Result<bool, AuthError> {
        #[derive(Deserialize)]
        struct CheckEmail {
            exists: bool,
        }

        let resp = self
            .http
            .get(self.url(&format!("/auth/user/checkEmail/{email}")))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        let resp = error_for_status(resp).await?;
        let body: CheckEmail = resp.json().await.map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(body.exists)
    }

    /// Create a new account (`POST /auth/user`).
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<Identity, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/user"))
            .json(&serde_json::json!({ "email": email, "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        let resp = error_for_status(resp).await?;
        resp.json().await.map_err(|e| AuthError::Decode(e.to_string()))
    }
}

async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::Status { status: status.as_u16(), body })
}

#[async_trait::async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn verify(&self, token: &str) -> Result<Option<Identity>, AuthError> {
        let resp = self
            .http
            .get(self.url("/auth/user"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        let resp = error_for_status(resp).await?;
        let user: Identity = resp.json().await.map_err(|e| AuthError::Decode(e.to_string()))?;
        Ok(Some(user))
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/user/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;
        let resp = error_for_status(resp).await?;
        resp.json().await.map_err(|e| AuthError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
