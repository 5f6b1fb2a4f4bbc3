//! Shared request layer: loading brackets and fault forwarding.
//!
//! DESIGN
//! ======
//! Every outbound call increments the loading signal's in-flight counter
//! before the request is sent and decrements it when the call settles,
//! success or failure. Protocol-level failures (transport errors,
//! undecodable bodies) are forwarded to the fault interceptor *and*
//! returned to the caller; plain non-2xx statuses are the caller's problem,
//! since a missing article is a local message, not an app-wide crash.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::fault::{FaultInterceptor, FaultRecord};
use crate::loading::LoadingSignal;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Protocol-level failures escalate to the fault interceptor; status
    /// failures stay with the caller.
    fn is_protocol_failure(&self) -> bool {
        matches!(self, ApiError::Http(_) | ApiError::Decode(_))
    }
}

/// REST client shared by every view. Clone-cheap.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    loading: LoadingSignal,
    faults: Arc<FaultInterceptor>,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str, loading: LoadingSignal, faults: Arc<FaultInterceptor>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            loading,
            faults,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path)), path).await
    }

    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path)).json(body), path).await
    }

    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(self.http.put(self.url(path)).json(body), path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.delete(self.url(path)), path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder, path: &str) -> Result<T, ApiError> {
        self.loading.begin_in_flight();
        let result = self.send_inner(request).await;
        self.loading.end_in_flight();

        if let Err(err) = &result {
            debug!(path, error = %err, "api call failed");
            if err.is_protocol_failure() {
                self.faults.handle(FaultRecord::with_cause("api request failed", err.to_string()));
            }
        }
        result
    }

    async fn send_inner<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let resp = request.send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }
        resp.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
