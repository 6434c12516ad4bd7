//! HTTP middleware for the dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//!
//! Authentication is enforced per handler with the extractors in [`auth`].

pub mod auth;
pub mod security_headers;

pub use auth::{AuthRejection, CurrentSession, LOGIN_REDIRECT, RequireAuth};
pub use security_headers::security_headers;
