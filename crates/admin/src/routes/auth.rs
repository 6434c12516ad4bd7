//! Authentication route handlers.
//!
//! Sign-in and sign-up are both served by the simulated login of the
//! [`SessionContext`](crate::services::SessionContext): any credentials are
//! accepted after the configured delay.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::services::{Credentials, SessionError};
use crate::state::AppState;

/// Page the browser returns to when the form names none.
const DEFAULT_RETURN_TO: &str = "/settings";

// =============================================================================
// Form Types
// =============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub return_to: Option<String>,
}

/// Sign-up form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub credentials: Credentials,
    pub return_to: Option<String>,
}

/// Sign-out form data.
#[derive(Debug, Deserialize)]
pub struct LogoutForm {
    pub return_to: Option<String>,
}

// =============================================================================
// Views
// =============================================================================

/// State of the sign-in modal on pages that gate content behind it.
#[derive(Debug, Clone)]
pub struct AuthModalView {
    pub open: bool,
    /// Page to come back to after signing in.
    pub return_to: String,
    /// Link that dismisses the modal.
    pub close_url: String,
}

impl AuthModalView {
    #[must_use]
    pub fn new(open: bool, return_to: &str, close_url: &str) -> Self {
        Self {
            open,
            return_to: return_to.to_string(),
            close_url: close_url.to_string(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Sign in and return to the page that opened the modal.
///
/// # Errors
///
/// Returns `AppError::Session` if the dashboard is shutting down.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    sign_in(&state, &form.credentials, form.return_to.as_deref()).await
}

/// Create an account. Behaves exactly like sign-in.
///
/// # Errors
///
/// Returns `AppError::Session` if the dashboard is shutting down.
#[instrument(skip(state, form))]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    tracing::info!(name = %form.name, "Sign-up submitted");
    sign_in(&state, &form.credentials, form.return_to.as_deref()).await
}

/// Sign out immediately.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>, Form(form): Form<LogoutForm>) -> Redirect {
    state.session().logout();
    clear_sentry_user();
    Redirect::to(&safe_return_to(form.return_to.as_deref()))
}

async fn sign_in(
    state: &AppState,
    credentials: &Credentials,
    return_to: Option<&str>,
) -> Result<Response, AppError> {
    let target = safe_return_to(return_to);

    match state.session().login(credentials).await {
        Ok(_) => {
            set_sentry_user(&credentials.email);
            Ok(Redirect::to(&target).into_response())
        }
        // A logout won the race; the operator stays signed out
        Err(SessionError::Superseded) => Ok(Redirect::to(&target).into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Only allow local paths as redirect targets.
fn safe_return_to(return_to: Option<&str>) -> String {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => DEFAULT_RETURN_TO.to_string(),
    }
}
