//! Authentication extractors.
//!
//! The dashboard has a single process-wide session (see
//! [`SessionContext`](crate::services::SessionContext)), so the extractors
//! read it from [`AppState`] instead of a per-request cookie store.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::services::SessionSnapshot;
use crate::state::AppState;

/// Where guests are sent when an action needs a signed-in operator.
pub const LOGIN_REDIRECT: &str = "/settings?auth=required";

/// Extractor that copies the current session state.
///
/// Never rejects. Guests get a snapshot with `is_authenticated == false`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     if session.is_authenticated { "Welcome back" } else { "Hello, guest" }
/// }
/// ```
pub struct CurrentSession(pub SessionSnapshot);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.session().snapshot()))
    }
}

/// Extractor that requires a signed-in operator.
///
/// Guests are redirected to the settings page with the sign-in modal open.
pub struct RequireAuth(pub SessionSnapshot);

/// Error returned when authentication is required but nobody is signed in.
pub enum AuthRejection {
    /// Redirect to the sign-in modal.
    RedirectToLogin,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_REDIRECT).into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let snapshot = state.session().snapshot();
        if !snapshot.is_authenticated {
            tracing::debug!(path = %parts.uri.path(), "Guest blocked from protected action");
            return Err(AuthRejection::RedirectToLogin);
        }
        Ok(Self(snapshot))
    }
}
