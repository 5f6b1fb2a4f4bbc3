//! REST backend plumbing.
//!
//! ARCHITECTURE
//! ============
//! `auth` owns the auth capability (verify/login) behind a trait so the
//! session never sees HTTP. `client` is the shared request layer: every
//! outbound call is bracketed by the loading signal's in-flight counter and
//! protocol-level failures are forwarded to the fault interceptor.

pub mod auth;
pub mod client;
