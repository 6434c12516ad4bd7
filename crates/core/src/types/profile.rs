//! The signed-in operator's profile and preferences.

use serde::{Deserialize, Serialize};

/// Profile of the operator using the dashboard.
///
/// A `Default` profile has every field empty; views substitute their own
/// placeholders for empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub bio: String,
}

impl UserProfile {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Apply a partial update. Fields absent from `update` keep their value.
    pub fn merge(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            phone,
            role,
            bio,
        } = update;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = role {
            self.role = v;
        }
        if let Some(v) = bio {
            self.bio = v;
        }
    }
}

/// A partial profile. `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.bio.is_none()
    }
}

/// A notification delivery channel the operator can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    EmailAlerts,
    PushNotifications,
    MarketingEmails,
    TeamActivity,
}

impl NotificationChannel {
    /// All channels in display order.
    pub const ALL: [Self; 4] = [
        Self::EmailAlerts,
        Self::PushNotifications,
        Self::MarketingEmails,
        Self::TeamActivity,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmailAlerts => "Email Alerts",
            Self::PushNotifications => "Push Notifications",
            Self::MarketingEmails => "Marketing Emails",
            Self::TeamActivity => "Team Activity",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::EmailAlerts => "Receive daily summaries and critical alerts.",
            Self::PushNotifications => "Real-time alerts on your desktop browser.",
            Self::MarketingEmails => "Receive offers, newsletters, and updates.",
            Self::TeamActivity => "Notify me when team members make changes.",
        }
    }

    /// Form value identifying the channel.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::EmailAlerts => "email_alerts",
            Self::PushNotifications => "push_notifications",
            Self::MarketingEmails => "marketing_emails",
            Self::TeamActivity => "team_activity",
        }
    }
}

/// On/off state of each notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email_alerts: bool,
    pub push_notifications: bool,
    pub marketing_emails: bool,
    pub team_activity: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_alerts: true,
            push_notifications: false,
            marketing_emails: false,
            team_activity: true,
        }
    }
}

impl NotificationPreferences {
    #[must_use]
    pub const fn is_enabled(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::EmailAlerts => self.email_alerts,
            NotificationChannel::PushNotifications => self.push_notifications,
            NotificationChannel::MarketingEmails => self.marketing_emails,
            NotificationChannel::TeamActivity => self.team_activity,
        }
    }

    /// Flip a channel and return its new state.
    pub const fn toggle(&mut self, channel: NotificationChannel) -> bool {
        let slot = match channel {
            NotificationChannel::EmailAlerts => &mut self.email_alerts,
            NotificationChannel::PushNotifications => &mut self.push_notifications,
            NotificationChannel::MarketingEmails => &mut self.marketing_emails,
            NotificationChannel::TeamActivity => &mut self.team_activity,
        };
        *slot = !*slot;
        *slot
    }
}
