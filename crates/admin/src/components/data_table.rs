//! Data table component types and row filters.
//!
//! A [`DataTableConfig`] describes what a table renders (headers, search box,
//! toggles, empty state). The query types ([`CustomerQuery`],
//! [`TransactionQuery`]) hold the current filter input and select the rows to
//! show. Filtering is recomputed on every request.

use serde::Deserialize;

use nexus_core::{Customer, Transaction, TransactionStatus};

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Right-align the column (numeric values).
    pub numeric: bool,
}

impl TableColumn {
    /// Create a new left-aligned column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            numeric: false,
        }
    }

    /// Create a new right-aligned column.
    #[must_use]
    pub fn numeric(key: &str, label: &str) -> Self {
        Self {
            numeric: true,
            ..Self::new(key, label)
        }
    }
}

/// On/off filter shown above a data table.
#[derive(Debug, Clone)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: String,
    /// Display label (the "off" label for toggles).
    pub label: String,
    /// Label shown while the toggle is on.
    pub active_label: Option<String>,
}

impl TableFilter {
    /// Create a toggle filter.
    #[must_use]
    pub fn toggle(key: &str, label: &str, active_label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            active_label: Some(active_label.to_string()),
        }
    }

    /// Label to show for the current toggle state.
    #[must_use]
    pub fn label_for(&self, active: bool) -> &str {
        match (&self.active_label, active) {
            (Some(active_label), true) => active_label,
            _ => &self.label,
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Toggle filters.
    pub filters: Vec<TableFilter>,
    /// Search placeholder text, `None` hides the search box.
    pub search_placeholder: Option<String>,
    /// Message shown when no rows match.
    pub empty_title: String,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            search_placeholder: None,
            empty_title: "No items found".to_string(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, placeholder: &str) -> Self {
        self.search_placeholder = Some(placeholder.to_string());
        self
    }

    /// Set empty state message.
    #[must_use]
    pub fn empty_state(mut self, title: &str) -> Self {
        self.empty_title = title.to_string();
        self
    }

    /// Look up a filter by key.
    #[must_use]
    pub fn find_filter(&self, key: &str) -> Option<&TableFilter> {
        self.filters.iter().find(|f| f.key == key)
    }
}

/// Build the customers table configuration.
#[must_use]
pub fn customers_table_config() -> DataTableConfig {
    DataTableConfig::new("customers")
        .column(TableColumn::new("name", "Customer"))
        .column(TableColumn::new("email", "Email"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("spent", "Spent"))
        .search_placeholder("Search customers...")
        .empty_state("No customers found.")
}

/// Build the sales transactions table configuration.
#[must_use]
pub fn transactions_table_config() -> DataTableConfig {
    DataTableConfig::new("transactions")
        .column(TableColumn::new("id", "Invoice ID"))
        .column(TableColumn::new("user", "Customer"))
        .column(TableColumn::new("date", "Date"))
        .column(TableColumn::numeric("amount", "Amount"))
        .column(TableColumn::new("status", "Status"))
        .filter(TableFilter::toggle("completed", "Filter Completed", "Show All"))
        .search_placeholder("Search ID or Name...")
        .empty_state("No transactions found.")
}

/// Build the analytics top pages table configuration.
#[must_use]
pub fn top_pages_table_config() -> DataTableConfig {
    DataTableConfig::new("top-pages")
        .column(TableColumn::new("path", "Page URL"))
        .column(TableColumn::numeric("views", "Views"))
        .empty_state("No page views recorded.")
}

/// Customer search input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    /// Case-insensitive substring of the name or email.
    #[serde(default, rename = "q")]
    pub search: String,
}

impl CustomerQuery {
    #[must_use]
    pub fn new(search: &str) -> Self {
        Self {
            search: search.to_string(),
        }
    }

    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        customer.matches_search(&self.search)
    }

    /// Matching customers, in their original order.
    #[must_use]
    pub fn apply(&self, customers: &[Customer]) -> Vec<Customer> {
        customers
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }
}

/// Transaction search and status toggle input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionQuery {
    /// Substring of the transaction id (as typed) or the user name (any case).
    #[serde(default, rename = "q")]
    pub search: String,
    /// Only keep completed transactions.
    #[serde(default, rename = "completed", deserialize_with = "toggle_param")]
    pub completed_only: bool,
}

impl TransactionQuery {
    #[must_use]
    pub fn new(search: &str, completed_only: bool) -> Self {
        Self {
            search: search.to_string(),
            completed_only,
        }
    }

    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let term = self.search.as_str();
        let matches_search = transaction.id.to_string().contains(term)
            || transaction
                .user
                .to_lowercase()
                .contains(&term.to_lowercase());
        let matches_status =
            !self.completed_only || transaction.status == TransactionStatus::Completed;

        matches_search && matches_status
    }

    /// Matching transactions, in their original order.
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }

    /// Query string reproducing this filter (without the leading `?`).
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push(format!("q={}", urlencoding::encode(&self.search)));
        }
        if self.completed_only {
            params.push("completed=1".to_string());
        }
        params.join("&")
    }
}

/// Accept `1`, `true`, `on` (checkbox) as set; anything else as unset.
fn toggle_param<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.is_some_and(|v| matches!(v.as_str(), "1" | "true" | "on")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use nexus_core::{CustomerId, CustomerStatus, Email, TransactionId};

    use super::*;

    fn customer(id: i32, name: &str, email: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: name.to_string(),
            email: Email::parse(email).unwrap(),
            status: CustomerStatus::Active,
            spent: Decimal::ZERO,
            color: CustomerStatus::Active.badge_class().to_string(),
        }
    }

    fn customers() -> Vec<Customer> {
        vec![
            customer(101, "Alice Freeman", "alice@example.com"),
            customer(102, "Bob Smith", "bob.smith@test.co"),
            customer(103, "Charlie Davis", "charlie@dev.io"),
            customer(104, "Diana Prince", "diana@amaz.on"),
            customer(105, "Evan Wright", "evan@write.net"),
            customer(106, "Fiona Gallagher", "fiona@shameless.tv"),
        ]
    }

    fn transaction(id: i32, user: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            user: user.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 5).unwrap(),
            amount: Decimal::new(100, 0),
            status,
        }
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            transaction(1024, "Alex Morgan", TransactionStatus::Completed),
            transaction(1023, "Sarah Connor", TransactionStatus::Processing),
            transaction(1022, "James Bond", TransactionStatus::Completed),
            transaction(1021, "Ellen Ripley", TransactionStatus::Failed),
            transaction(1020, "Bruce Wayne", TransactionStatus::Completed),
        ]
    }

    #[test]
    fn test_customer_search_for_a_excludes_only_bob() {
        let result = CustomerQuery::new("a").apply(&customers());
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|c| c.name != "Bob Smith"));
    }

    #[test]
    fn test_customer_search_is_case_insensitive_on_email() {
        let result = CustomerQuery::new("SHAMELESS").apply(&customers());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, CustomerId::new(106));
    }

    #[test]
    fn test_customer_search_is_idempotent() {
        let query = CustomerQuery::new("an");
        let once = query.apply(&customers());
        let twice = query.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_customer_search_empty_returns_all_in_order() {
        let all = customers();
        assert_eq!(CustomerQuery::default().apply(&all), all);
    }

    #[test]
    fn test_customer_search_no_match() {
        assert!(CustomerQuery::new("zzz").apply(&customers()).is_empty());
    }

    #[test]
    fn test_transaction_search_by_id_fragment() {
        let result = TransactionQuery::new("102", false).apply(&transactions());
        assert_eq!(result.len(), 5);

        let result = TransactionQuery::new("1021", false).apply(&transactions());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user, "Ellen Ripley");
    }

    #[test]
    fn test_transaction_search_by_user_any_case() {
        let result = TransactionQuery::new("BOND", false).apply(&transactions());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, TransactionId::new(1022));
    }

    #[test]
    fn test_transaction_completed_toggle_is_anded() {
        let completed = TransactionQuery::new("", true).apply(&transactions());
        assert_eq!(completed.len(), 3);
        assert!(
            completed
                .iter()
                .all(|t| t.status == TransactionStatus::Completed)
        );

        let result = TransactionQuery::new("sarah", true).apply(&transactions());
        assert!(result.is_empty());
    }

    #[test]
    fn test_transaction_query_string() {
        assert_eq!(TransactionQuery::default().to_query_string(), "");
        assert_eq!(
            TransactionQuery::new("james bond", true).to_query_string(),
            "q=james%20bond&completed=1"
        );
    }

    #[test]
    fn test_toggle_label_follows_state() {
        let config = transactions_table_config();
        let toggle = config.find_filter("completed").unwrap();
        assert_eq!(toggle.label_for(false), "Filter Completed");
        assert_eq!(toggle.label_for(true), "Show All");
    }

    #[test]
    fn test_customers_table_config() {
        let config = customers_table_config();
        assert_eq!(config.table_id, "customers");
        assert_eq!(config.columns.len(), 4);
        assert_eq!(config.empty_title, "No customers found.");
        assert!(config.search_placeholder.is_some());
    }

    #[test]
    fn test_top_pages_has_no_search() {
        assert!(top_pages_table_config().search_placeholder.is_none());
    }
}
