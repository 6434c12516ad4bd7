//! Session state of the dashboard operator.
//!
//! There is one [`SessionContext`] per running dashboard, created at start-up
//! and owned by the application state. It tracks whether the operator is
//! signed in, their cached profile, and their notification preferences.
//!
//! Sign-in is simulated: any credentials are accepted after a fixed delay.
//! Sign-out is immediate and keeps the cached profile. Profile edits are
//! shallow merges applied in memory only.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::instrument;

use nexus_core::{NotificationChannel, NotificationPreferences, ProfileUpdate, UserProfile};

use crate::api::ApiError;

/// Errors from session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session was closed while the operation was in flight.
    #[error("session is closed")]
    Closed,

    /// A logout happened while the login was in flight.
    #[error("login superseded by a logout")]
    Superseded,
}

/// Submitted sign-in or sign-up credentials.
///
/// Accepted as-is, including missing fields. Implements `Debug` manually to
/// redact the password.
#[derive(Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Not signed in. The profile may or may not be cached.
    Guest,
    /// Not signed in and the profile is still being fetched.
    Loading,
    /// Signed in.
    Authenticated,
}

/// Point-in-time copy of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub user: Option<UserProfile>,
    /// The initial profile fetch has not settled yet.
    pub loading: bool,
    pub preferences: NotificationPreferences,
}

impl SessionSnapshot {
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.is_authenticated {
            SessionPhase::Authenticated
        } else if self.loading {
            SessionPhase::Loading
        } else {
            SessionPhase::Guest
        }
    }
}

struct SessionInner {
    authenticated: bool,
    user: Option<UserProfile>,
    loading: bool,
    preferences: NotificationPreferences,
    /// Bumped by every logout so logins started earlier can tell.
    epoch: u64,
    closed: bool,
}

impl SessionInner {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            is_authenticated: self.authenticated,
            user: self.user.clone(),
            loading: self.loading,
            preferences: self.preferences,
        }
    }
}

/// Process-wide authentication flag and profile.
pub struct SessionContext {
    inner: RwLock<SessionInner>,
    login_delay: Duration,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SessionContext")
            .field("authenticated", &inner.authenticated)
            .field("loading", &inner.loading)
            .field("closed", &inner.closed)
            .field("login_delay", &self.login_delay)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Create a signed-out session whose profile has not been loaded yet.
    #[must_use]
    pub fn new(login_delay: Duration) -> Self {
        Self {
            inner: RwLock::new(SessionInner {
                authenticated: false,
                user: None,
                loading: true,
                preferences: NotificationPreferences::default(),
                epoch: 0,
                closed: false,
            }),
            login_delay,
        }
    }

    /// Load the operator profile with `load`.
    ///
    /// Runs regardless of authentication. A failure is logged and leaves the
    /// profile empty; either way `loading` ends up `false`.
    #[instrument(skip_all)]
    pub async fn initialize<F, Fut>(&self, load: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<UserProfile>, ApiError>>,
    {
        let result = load().await;

        let mut inner = self.inner.write();
        if inner.closed {
            return;
        }
        match result {
            Ok(profile) => {
                tracing::info!("User profile loaded");
                inner.user = Some(UserProfile::clone(&profile));
            }
            Err(e) => {
                tracing::error!("Failed to load user profile: {e}");
            }
        }
        inner.loading = false;
    }

    /// Simulated sign-in. Accepts any credentials after the login delay.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if [`SessionContext::logout`] was
    /// called while waiting, and `SessionError::Closed` if the session was
    /// closed.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionSnapshot, SessionError> {
        let epoch = {
            let inner = self.inner.read();
            if inner.closed {
                return Err(SessionError::Closed);
            }
            inner.epoch
        };

        tokio::time::sleep(self.login_delay).await;

        let mut inner = self.inner.write();
        if inner.closed {
            return Err(SessionError::Closed);
        }
        if inner.epoch != epoch {
            tracing::info!("Login discarded after logout");
            return Err(SessionError::Superseded);
        }

        inner.authenticated = true;
        tracing::info!("Signed in");
        Ok(inner.snapshot())
    }

    /// Sign out immediately. The cached profile is kept.
    pub fn logout(&self) {
        let mut inner = self.inner.write();
        inner.authenticated = false;
        inner.epoch += 1;
        tracing::info!("Signed out");
    }

    /// Shallow-merge `update` into the cached profile and return the result.
    ///
    /// When no profile is cached the update is merged into an empty one.
    pub fn update_user(&self, update: ProfileUpdate) -> UserProfile {
        let mut inner = self.inner.write();
        let user = inner.user.get_or_insert_with(UserProfile::default);
        user.merge(update);
        user.clone()
    }

    /// Flip a notification channel and return its new state.
    pub fn toggle_preference(&self, channel: NotificationChannel) -> bool {
        self.inner.write().preferences.toggle(channel)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().authenticated
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().snapshot()
    }

    /// Tear down. Pending logins fail and a late profile load is ignored.
    pub fn close(&self) {
        self.inner.write().closed = true;
    }
}
