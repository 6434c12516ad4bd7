//! Settings routes.
//!
//! Three tabs: the operator profile (locked for guests), notification
//! channel toggles and a static security panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use nexus_core::{NotificationChannel, NotificationPreferences, ProfileUpdate, UserProfile};

use crate::filters;
use crate::middleware::{CurrentSession, RequireAuth};
use crate::state::AppState;

use super::auth::AuthModalView;

// =============================================================================
// Query Parameters
// =============================================================================

/// Settings query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    pub tab: Option<String>,
    pub success: Option<String>,
    /// `required` when a protected action bounced a guest here.
    pub auth: Option<String>,
}

/// Notification toggle form.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub channel: NotificationChannel,
}

// =============================================================================
// Views
// =============================================================================

/// Settings tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Notifications,
    Security,
}

impl SettingsTab {
    pub const ALL: [Self; 3] = [Self::General, Self::Notifications, Self::Security];

    fn from_param(value: Option<&str>) -> Option<Self> {
        match value? {
            "general" => Some(Self::General),
            "notifications" => Some(Self::Notifications),
            "security" => Some(Self::Security),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Notifications => "notifications",
            Self::Security => "security",
        }
    }

    const fn label(self, authenticated: bool) -> &'static str {
        match self {
            Self::General if authenticated => "General Profile",
            Self::General => "Profile (Locked)",
            Self::Notifications => "Notifications",
            Self::Security => "Security",
        }
    }

    /// Tab shown when none (or a locked one) is requested.
    const fn default_for(authenticated: bool) -> Self {
        if authenticated {
            Self::General
        } else {
            Self::Notifications
        }
    }
}

/// Sidebar tab link.
#[derive(Debug, Clone)]
pub struct TabView {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
    pub locked: bool,
}

/// Notification channel toggle.
#[derive(Debug, Clone)]
pub struct ToggleView {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

impl ToggleView {
    fn all(preferences: &NotificationPreferences) -> Vec<Self> {
        NotificationChannel::ALL
            .iter()
            .map(|&channel| Self {
                key: channel.key(),
                label: channel.label(),
                description: channel.description(),
                enabled: preferences.is_enabled(channel),
            })
            .collect()
    }
}

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileFormView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
}

impl From<&UserProfile> for ProfileFormView {
    fn from(user: &UserProfile) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            bio: user.bio.clone(),
        }
    }
}

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub current_path: String,
    pub authenticated: bool,
    pub tab: &'static str,
    pub tabs: Vec<TabView>,
    /// `None` renders "Loading settings...".
    pub profile: Option<ProfileFormView>,
    pub toggles: Vec<ToggleView>,
    pub success_message: Option<String>,
    pub auth: AuthModalView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Settings page handler.
///
/// Guests asking for the profile tab get the sign-in modal on top of the
/// default tab.
#[instrument(skip(session))]
pub async fn index(
    CurrentSession(session): CurrentSession,
    Query(query): Query<SettingsQuery>,
) -> impl IntoResponse {
    let authenticated = session.is_authenticated;
    let requested = SettingsTab::from_param(query.tab.as_deref());

    let locked_request = !authenticated && requested == Some(SettingsTab::General);
    let tab = match requested {
        Some(tab) if !locked_request => tab,
        _ => SettingsTab::default_for(authenticated),
    };
    let modal_open =
        !authenticated && (locked_request || query.auth.as_deref() == Some("required"));

    let tabs = SettingsTab::ALL
        .iter()
        .map(|&t| TabView {
            key: t.key(),
            label: t.label(authenticated),
            active: t == tab,
            locked: t == SettingsTab::General && !authenticated,
        })
        .collect();

    let success_message = match query.success.as_deref() {
        Some("profile") => Some("Saved Successfully!".to_string()),
        _ => None,
    };

    SettingsTemplate {
        current_path: "/settings".to_string(),
        authenticated,
        tab: tab.key(),
        tabs,
        profile: session.user.as_ref().map(ProfileFormView::from),
        toggles: ToggleView::all(&session.preferences),
        success_message,
        auth: AuthModalView::new(
            modal_open,
            "/settings?tab=general",
            &format!("/settings?tab={}", tab.key()),
        ),
    }
}

/// Save the profile form. Guests are sent to the sign-in modal.
#[instrument(skip(state, _auth, update))]
pub async fn save_profile(
    State(state): State<AppState>,
    RequireAuth(_auth): RequireAuth,
    Form(update): Form<ProfileUpdate>,
) -> Redirect {
    if update.is_empty() {
        tracing::debug!("Profile form submitted without changes");
    }
    let user = state.session().update_user(update);
    tracing::info!(name = %user.full_name(), "Profile saved");
    Redirect::to("/settings?tab=general&success=profile")
}

/// Flip one notification channel.
#[instrument(skip(state))]
pub async fn toggle_notification(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Redirect {
    let enabled = state.session().toggle_preference(form.channel);
    tracing::info!(channel = form.channel.key(), enabled, "Notification preference changed");
    Redirect::to("/settings?tab=notifications")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_from_param() {
        assert_eq!(
            SettingsTab::from_param(Some("security")),
            Some(SettingsTab::Security)
        );
        assert_eq!(SettingsTab::from_param(Some("billing")), None);
        assert_eq!(SettingsTab::from_param(None), None);
    }

    #[test]
    fn test_default_tab_depends_on_auth() {
        assert_eq!(SettingsTab::default_for(true), SettingsTab::General);
        assert_eq!(SettingsTab::default_for(false), SettingsTab::Notifications);
    }

    #[test]
    fn test_general_tab_label_when_locked() {
        assert_eq!(SettingsTab::General.label(false), "Profile (Locked)");
        assert_eq!(SettingsTab::General.label(true), "General Profile");
    }

    #[test]
    fn test_toggles_reflect_preferences() {
        let toggles = ToggleView::all(&NotificationPreferences::default());
        let enabled: Vec<bool> = toggles.iter().map(|t| t.enabled).collect();
        assert_eq!(enabled, [true, false, false, true]);
        assert_eq!(toggles[0].key, "email_alerts");
    }

    #[test]
    fn test_toggle_form_parses_channel() {
        let form: ToggleForm = parse_toggle("channel=marketing_emails");
        assert_eq!(form.channel, NotificationChannel::MarketingEmails);
    }

    fn parse_toggle(raw: &str) -> ToggleForm {
        let uri: axum::http::Uri = format!("/settings/notifications?{raw}").parse().unwrap();
        Query::<ToggleForm>::try_from_uri(&uri).unwrap().0
    }
}
