//! Status enums for dashboard records.
//!
//! Every status serializes with the exact label shown in the UI (`"Active"`,
//! `"Completed"`, ...) so exported CSV files match what the operator sees.

use serde::{Deserialize, Serialize};

/// Account status of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Pending,
    Banned,
}

impl CustomerStatus {
    /// Presentation tag used for the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Active => "text-green-400 bg-green-500/10",
            Self::Inactive => "text-gray-400 bg-gray-500/10",
            Self::Pending => "text-orange-400 bg-orange-500/10",
            Self::Banned => "text-red-400 bg-red-500/10",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Pending => write!(f, "Pending"),
            Self::Banned => write!(f, "Banned"),
        }
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Pending" => Ok(Self::Pending),
            "Banned" => Ok(Self::Banned),
            _ => Err(format!("invalid customer status: {s}")),
        }
    }
}

/// Settlement status of a sales transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Processing,
    Failed,
}

impl TransactionStatus {
    /// Presentation tag used for the status badge.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Completed => "status-completed",
            Self::Processing => "status-processing",
            Self::Failed => "status-failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Processing => write!(f, "Processing"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Completed" => Ok(Self::Completed),
            "Processing" => Ok(Self::Processing),
            "Failed" => Ok(Self::Failed),
            _ => Err(format!("invalid transaction status: {s}")),
        }
    }
}

/// Category of an activity-feed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    User,
    Alert,
    Sale,
    Message,
    Success,
}

impl NotificationKind {
    /// Glyph rendered in the notification bubble.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::User => "\u{1F464}",
            Self::Alert => "\u{26A0}",
            Self::Sale => "\u{1F6D2}",
            Self::Message => "\u{2709}",
            Self::Success => "\u{2714}",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Alert => write!(f, "alert"),
            Self::Sale => write!(f, "sale"),
            Self::Message => write!(f, "message"),
            Self::Success => write!(f, "success"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "alert" => Ok(Self::Alert),
            "sale" => Ok(Self::Sale),
            "message" => Ok(Self::Message),
            "success" => Ok(Self::Success),
            _ => Err(format!("invalid notification kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_status_round_trips_through_display() {
        for status in [
            CustomerStatus::Active,
            CustomerStatus::Inactive,
            CustomerStatus::Pending,
            CustomerStatus::Banned,
        ] {
            assert_eq!(status.to_string().parse::<CustomerStatus>().unwrap(), status);
        }
        assert!("active".parse::<CustomerStatus>().is_err());
    }

    #[test]
    fn test_transaction_status_serializes_as_label() {
        let json = serde_json::to_string(&TransactionStatus::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
    }

    #[test]
    fn test_notification_kind_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Success).unwrap();
        assert_eq!(json, "\"success\"");
        assert_eq!("alert".parse::<NotificationKind>().unwrap(), NotificationKind::Alert);
    }

    #[test]
    fn test_banned_badge_is_red() {
        assert!(CustomerStatus::Banned.badge_class().contains("red"));
    }
}
