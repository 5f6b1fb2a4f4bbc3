//! Process-wide fault interceptor.
//!
//! DESIGN
//! ======
//! Any unhandled fault in the view tree lands here: the fault is recorded
//! for the error view (single slot, newest wins), the busy indicator is
//! hard-reset (a crashed operation must never leave the spinner up), and
//! navigation is replaced with the terminal error route. A re-entry guard
//! skips the reset-and-redirect for faults raised *while* one is being
//! handled: the error view's own mount failing must not start a redirect
//! loop. The record itself is written unconditionally.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::error;

use crate::loading::LoadingSignal;
use crate::routes::{Route, Router};

/// Last captured fault; single slot, overwritten on each new fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultRecord {
    pub message: String,
    pub cause: Option<String>,
}

impl FaultRecord {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), cause: None }
    }

    #[must_use]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self { message: message.into(), cause: Some(cause.into()) }
    }
}

pub struct FaultInterceptor {
    loading: LoadingSignal,
    router: Arc<dyn Router>,
    handling: AtomicBool,
    record: Mutex<Option<FaultRecord>>,
}

impl FaultInterceptor {
    #[must_use]
    pub fn new(loading: LoadingSignal, router: Arc<dyn Router>) -> Self {
        Self { loading, router, handling: AtomicBool::new(false), record: Mutex::new(None) }
    }

    /// Handle an unrecoverable fault. Every fault overwrites the record
    /// slot; nested calls (a fault raised while one is mid-handling) skip
    /// the reset-and-redirect, and sequential faults each get a full cycle.
    pub fn handle(&self, fault: FaultRecord) {
        error!(message = %fault.message, cause = ?fault.cause, "unhandled fault");
        {
            let mut record = self.record.lock().unwrap_or_else(PoisonError::into_inner);
            *record = Some(fault);
        }

        if self.handling.swap(true, Ordering::SeqCst) {
            error!("fault raised during fault handling; redirect suppressed");
            return;
        }

        self.loading.hard_reset();
        if self.router.current() != Route::Error {
            self.router.replace(Route::Error);
        }

        self.handling.store(false, Ordering::SeqCst);
    }

    /// Last recorded fault, if any, left in place.
    #[must_use]
    pub fn last(&self) -> Option<FaultRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Consume the recorded fault (the error view displays it once).
    #[must_use]
    pub fn take(&self) -> Option<FaultRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[cfg(test)]
#[path = "fault_test.rs"]
mod tests;
