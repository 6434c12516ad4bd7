//! Sales page: financial cards, transaction list and CSV export.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use nexus_core::{Financials, Transaction};

use crate::{
    components::{CountUpView, DataTableConfig, TransactionQuery, transactions_table_config},
    config::CountUpConfig,
    error::AppError,
    filters,
    routes::{NO_DATA_FLAG, export_or_redirect, path_with_query},
    services::{CsvExport, NO_DATA_MESSAGE},
    state::AppState,
};

/// Sales query parameters: the transaction filter plus the alert flag.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    #[serde(flatten)]
    pub filter: TransactionQuery,
    pub error: Option<String>,
}

/// Financial summary card.
#[derive(Debug, Clone)]
pub struct FinanceCardView {
    pub label: &'static str,
    pub value: CountUpView,
    pub highlight: bool,
}

impl FinanceCardView {
    fn cards(financials: &Financials, count_up: CountUpConfig) -> Vec<Self> {
        vec![
            Self {
                label: "Net Profit",
                value: CountUpView::new(financials.net_profit, "$", "", count_up),
                highlight: true,
            },
            Self {
                label: "Gross Revenue",
                value: CountUpView::new(financials.gross_revenue, "$", "", count_up),
                highlight: false,
            },
            Self {
                label: "Avg. Order Value",
                value: CountUpView::new(financials.avg_order, "$", ".00", count_up),
                highlight: false,
            },
            Self {
                label: "Refunds",
                value: CountUpView::new(financials.refunds, "", "%", count_up),
                highlight: false,
            },
        ]
    }
}

/// Transaction row view.
#[derive(Debug, Clone)]
pub struct TransactionView {
    pub invoice: String,
    pub user: String,
    pub date: String,
    pub amount: CountUpView,
    pub status: String,
    pub badge_class: &'static str,
}

impl TransactionView {
    fn new(transaction: &Transaction, count_up: CountUpConfig) -> Self {
        // Whole amounts get explicit cents
        let suffix = if transaction.amount.fract().is_zero() {
            ".00"
        } else {
            ""
        };

        Self {
            invoice: transaction.invoice_number(),
            user: transaction.user.clone(),
            date: transaction.display_date(),
            amount: CountUpView::new(transaction.amount, "$", suffix, count_up),
            status: transaction.status.to_string(),
            badge_class: transaction.status.badge_class(),
        }
    }
}

/// Sales page template.
#[derive(Template, WebTemplate)]
#[template(path = "sales.html")]
pub struct SalesTemplate {
    pub current_path: String,
    pub table: DataTableConfig,
    pub loading: bool,
    pub cards: Vec<FinanceCardView>,
    pub transactions: Vec<TransactionView>,
    pub search: String,
    pub completed_only: bool,
    pub toggle_label: String,
    /// Link flipping the "completed only" toggle, keeping the search.
    pub toggle_url: String,
    pub export_url: String,
    pub flash_error: Option<String>,
}

/// Sales page handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> impl IntoResponse {
    let api = state.api();
    let sales = state.resources().sales.load(|| api.get_sales()).await;
    let count_up = state.config().count_up;

    let filter = query.filter;
    let (cards, transactions) = sales.data.as_deref().map_or_else(
        || (vec![], vec![]),
        |snapshot| {
            (
                FinanceCardView::cards(&snapshot.financials, count_up),
                filter
                    .apply(&snapshot.transactions)
                    .iter()
                    .map(|t| TransactionView::new(t, count_up))
                    .collect(),
            )
        },
    );

    let table = transactions_table_config();
    let toggle_label = table
        .find_filter("completed")
        .map(|f| f.label_for(filter.completed_only).to_string())
        .unwrap_or_default();
    let toggled = TransactionQuery::new(&filter.search, !filter.completed_only);

    SalesTemplate {
        current_path: "/sales".to_string(),
        table,
        loading: sales.is_pending(),
        cards,
        transactions,
        completed_only: filter.completed_only,
        toggle_label,
        toggle_url: path_with_query("/sales", &toggled.to_query_string()),
        export_url: path_with_query("/sales/export", &filter.to_query_string()),
        search: filter.search,
        flash_error: (query.error.as_deref() == Some(NO_DATA_FLAG))
            .then(|| NO_DATA_MESSAGE.to_string()),
    }
}

/// Download the filtered transactions as `sales_transactions.csv`.
///
/// An empty filter result is reported as "no data" like an empty dataset.
#[instrument(skip(state))]
pub async fn export(
    State(state): State<AppState>,
    Query(filter): Query<TransactionQuery>,
) -> Result<Response, AppError> {
    let api = state.api();
    let sales = state
        .resources()
        .sales
        .load_if_empty(|| api.get_sales())
        .await;

    let rows = sales
        .data
        .as_deref()
        .map(|snapshot| filter.apply(&snapshot.transactions))
        .unwrap_or_default();

    export_or_redirect(
        CsvExport::build(Some(rows.as_slice()), "sales_transactions"),
        &path_with_query("/sales", &filter.to_query_string()),
    )
}
