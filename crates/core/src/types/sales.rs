//! Sales page records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::TransactionId;
use super::money::amount_serde;
use super::status::TransactionStatus;

/// Period financials shown in the sales cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub net_profit: u64,
    pub gross_revenue: u64,
    pub avg_order: u64,
    /// Refund rate in percent.
    #[serde(with = "amount_serde")]
    pub refunds: Decimal,
}

/// A completed or pending payment.
///
/// Field order is the column order of the transactions export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Display name of the paying user.
    pub user: String,
    #[serde(with = "display_date")]
    pub date: NaiveDate,
    #[serde(with = "amount_serde")]
    pub amount: Decimal,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Invoice reference shown in the table (`#INV-1024`).
    #[must_use]
    pub fn invoice_number(&self) -> String {
        format!("#INV-{}", self.id)
    }

    /// Date formatted the way it is listed (`Dec 07, 2025`).
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format(display_date::FORMAT).to_string()
    }
}

/// Everything the sales page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSnapshot {
    pub financials: Financials,
    pub transactions: Vec<Transaction>,
}

/// Serde adapter for `Dec 07, 2025` style dates.
mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%b %d, %Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn transaction() -> Transaction {
        Transaction {
            id: TransactionId::new(1023),
            user: "Sarah Connor".to_owned(),
            date: NaiveDate::from_ymd_opt(2025, 12, 6).unwrap(),
            amount: Decimal::new(45050, 2),
            status: TransactionStatus::Processing,
        }
    }

    #[test]
    fn test_invoice_number() {
        assert_eq!(transaction().invoice_number(), "#INV-1023");
    }

    #[test]
    fn test_display_date_is_zero_padded() {
        assert_eq!(transaction().display_date(), "Dec 06, 2025");
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = serde_json::to_string(&transaction()).unwrap();
        assert_eq!(
            json,
            r#"{"id":1023,"user":"Sarah Connor","date":"Dec 06, 2025","amount":450.5,"status":"Processing"}"#
        );
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, transaction());
    }
}
