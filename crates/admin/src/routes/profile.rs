//! Operator profile page.
//!
//! Guests see blurred placeholder details with the sign-in modal open. Once
//! the modal is dismissed a "Profile Locked" overlay offers it again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use nexus_core::UserProfile;

use crate::filters;
use crate::middleware::CurrentSession;

use super::auth::AuthModalView;

const GUEST_BIO: &str = "Please log in to view the full user biography and details.";

/// Profile query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    /// `closed` once the guest dismissed the sign-in modal.
    pub modal: Option<String>,
}

/// Profile details with placeholders for anything missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub first_name: String,
    pub last_name: String,
    pub initials: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
}

impl ProfileView {
    fn new(user: Option<&UserProfile>) -> Self {
        let field = |value: Option<&str>, fallback: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        let first_name = field(user.map(|u| u.first_name.as_str()), "Guest");
        let last_name = field(user.map(|u| u.last_name.as_str()), "User");
        let initials = [&first_name, &last_name]
            .iter()
            .filter_map(|name| name.chars().next())
            .collect();

        Self {
            initials,
            role: field(user.map(|u| u.role.as_str()), "Visitor"),
            email: field(user.map(|u| u.email.as_str()), "hidden@email.com"),
            phone: field(user.map(|u| u.phone.as_str()), "+1 (555) ***-****"),
            bio: field(user.map(|u| u.bio.as_str()), GUEST_BIO),
            first_name,
            last_name,
        }
    }
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub current_path: String,
    /// Content is blurred and read-only.
    pub locked: bool,
    /// Signed in but the profile has not arrived yet.
    pub loading: bool,
    pub profile: ProfileView,
    pub show_lock_overlay: bool,
    pub auth: AuthModalView,
}

/// Profile page handler.
#[instrument(skip(session))]
pub async fn index(
    CurrentSession(session): CurrentSession,
    Query(query): Query<ProfileQuery>,
) -> impl IntoResponse {
    let locked = !session.is_authenticated;
    let dismissed = query.modal.as_deref() == Some("closed");

    ProfileTemplate {
        current_path: "/profile".to_string(),
        locked,
        loading: session.is_authenticated && session.user.is_none(),
        // Guests only ever see placeholders
        profile: ProfileView::new(session.user.as_ref().filter(|_| !locked)),
        show_lock_overlay: locked && dismissed,
        auth: AuthModalView::new(locked && !dismissed, "/profile", "/profile?modal=closed"),
    }
}
