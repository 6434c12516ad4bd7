//! Customer list with search and CSV export.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use nexus_core::{Customer, format_currency};

use crate::{
    components::{CustomerQuery, DataTableConfig, customers_table_config},
    error::AppError,
    filters,
    routes::{export_or_redirect, path_with_query},
    services::CsvExport,
    state::AppState,
};

/// Customer row view.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub name: String,
    pub initial: char,
    pub email: String,
    pub status: String,
    /// Badge classes stored with the record.
    pub color: String,
    pub spent: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            initial: customer.initial(),
            email: customer.email.to_string(),
            status: customer.status.to_string(),
            color: customer.color.clone(),
            spent: format_currency(customer.spent),
        }
    }
}

/// Customers page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub current_path: String,
    pub table: DataTableConfig,
    pub loading: bool,
    pub customers: Vec<CustomerView>,
    pub search: String,
    pub export_url: String,
}

/// Customers list page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> impl IntoResponse {
    let api = state.api();
    let customers = state
        .resources()
        .customers
        .load(|| api.get_customers())
        .await;

    let rows = customers
        .data
        .as_deref()
        .map(|all| query.apply(all))
        .unwrap_or_default();

    CustomersIndexTemplate {
        current_path: "/customers".to_string(),
        table: customers_table_config(),
        loading: customers.is_pending(),
        customers: rows.iter().map(CustomerView::from).collect(),
        export_url: path_with_query("/customers/export", &search_query(&query)),
        search: query.search,
    }
}

/// Download the filtered customers as `customers.csv`.
#[instrument(skip(state))]
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Response, AppError> {
    let api = state.api();
    let customers = state
        .resources()
        .customers
        .load_if_empty(|| api.get_customers())
        .await;

    let rows = customers.data.as_deref().map(|all| query.apply(all));
    export_or_redirect(
        CsvExport::build(rows.as_deref(), "customers"),
        &path_with_query("/customers", &search_query(&query)),
    )
}

fn search_query(query: &CustomerQuery) -> String {
    if query.search.is_empty() {
        String::new()
    } else {
        format!("q={}", urlencoding::encode(&query.search))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use nexus_core::{CustomerId, CustomerStatus, Email};

    use super::*;

    #[test]
    fn test_customer_view() {
        let customer = Customer {
            id: CustomerId::new(104),
            name: "Diana Prince".to_string(),
            email: Email::parse("diana@amaz.on").unwrap(),
            status: CustomerStatus::Banned,
            spent: Decimal::new(45000, 0),
            color: "text-red-400 bg-red-500/10".to_string(),
        };

        let view = CustomerView::from(&customer);
        assert_eq!(view.initial, 'D');
        assert_eq!(view.status, "Banned");
        assert_eq!(view.spent, "$45,000");
        assert_eq!(view.color, "text-red-400 bg-red-500/10");
    }

    #[test]
    fn test_search_query_is_encoded() {
        assert_eq!(search_query(&CustomerQuery::default()), "");
        assert_eq!(search_query(&CustomerQuery::new("a b")), "q=a%20b");
    }
}
