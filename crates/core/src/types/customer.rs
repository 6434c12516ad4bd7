//! Customer records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::CustomerId;
use super::money::amount_serde;
use super::status::CustomerStatus;

/// A customer account as listed on the customers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub status: CustomerStatus,
    /// Lifetime spend. Never negative.
    #[serde(with = "amount_serde")]
    pub spent: Decimal,
    /// Display tag for the status badge.
    pub color: String,
}

impl Customer {
    /// Whether the name or the email contains `term`, ignoring case.
    ///
    /// An empty term matches every customer.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
            || self.email.contains_ignore_case(term)
    }

    /// Uppercased first letter of the name, used for the avatar bubble.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map_or('?', |c| c.to_ascii_uppercase())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bob() -> Customer {
        Customer {
            id: CustomerId::new(102),
            name: "Bob Smith".to_owned(),
            email: Email::parse("bob.smith@test.co").unwrap(),
            status: CustomerStatus::Inactive,
            spent: Decimal::ZERO,
            color: CustomerStatus::Inactive.badge_class().to_owned(),
        }
    }

    #[test]
    fn test_matches_search_on_name_or_email() {
        let customer = bob();
        assert!(customer.matches_search("BOB"));
        assert!(customer.matches_search("test.co"));
        assert!(customer.matches_search(""));
        assert!(!customer.matches_search("a"));
    }

    #[test]
    fn test_initial() {
        assert_eq!(bob().initial(), 'B');
    }

    #[test]
    fn test_spent_serializes_as_number() {
        let value = serde_json::to_value(bob()).unwrap();
        assert_eq!(value["spent"], 0);
        assert_eq!(value["status"], "Inactive");
    }

    #[test]
    fn test_color_is_the_last_field() {
        let value = serde_json::to_value(bob()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "email", "status", "spent", "color"]);
        assert_eq!(value["color"], "text-gray-400 bg-gray-500/10");
    }
}
