//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check (registered in `app`)
//!
//! # Overview
//! GET  /                        - Stats, revenue chart, notifications
//! GET  /overview/export         - overview_report.csv
//!
//! # Customers
//! GET  /customers               - Customer list (?q=)
//! GET  /customers/export        - customers.csv (same filter)
//!
//! # Analytics
//! GET  /analytics               - Traffic analytics (?range=30|90)
//!
//! # Sales
//! GET  /sales                   - Financials and transactions (?q=&completed=1)
//! GET  /sales/export            - sales_transactions.csv (same filters)
//!
//! # Settings
//! GET  /settings                - Settings tabs (?tab=general|notifications|security)
//! POST /settings/profile        - Save profile (requires auth)
//! POST /settings/notifications  - Toggle a notification channel
//!
//! # Profile
//! GET  /profile                 - Operator profile (locked for guests)
//!
//! # Auth
//! POST /auth/login              - Simulated sign-in
//! POST /auth/signup             - Simulated sign-up
//! POST /auth/logout             - Sign out
//! ```

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod profile;
pub mod sales;
pub mod settings;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::error::AppError;
use crate::services::{CsvExport, ExportError};
use crate::state::AppState;

/// Query value that asks a page to show the "no data" alert.
pub const NO_DATA_FLAG: &str = "no_data";

/// Create the overview routes router.
pub fn overview_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/overview/export", get(dashboard::export))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/export", get(customers::export))
}

/// Create the sales routes router.
pub fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::index))
        .route("/export", get(sales::export))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::index))
        .route("/profile", post(settings::save_profile))
        .route("/notifications", post(settings::toggle_notification))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create all page routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(overview_routes())
        .nest("/customers", customer_routes())
        .route("/analytics", get(analytics::index))
        .nest("/sales", sales_routes())
        .nest("/settings", settings_routes())
        .route("/profile", get(profile::index))
        .nest("/auth", auth_routes())
}

/// Turn an export result into a download, or send the browser back to
/// `back_to` with the "no data" alert when there was nothing to export.
///
/// # Errors
///
/// Returns `AppError::Export` for exports that failed for another reason.
pub fn export_or_redirect(
    result: Result<CsvExport, ExportError>,
    back_to: &str,
) -> Result<Response, AppError> {
    match result {
        Ok(csv) => Ok(csv.into_response()),
        Err(ExportError::NoData) => {
            tracing::warn!(back_to, "Export requested with no data");
            Ok(Redirect::to(&with_no_data_flag(back_to)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

fn with_no_data_flag(path: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}error={NO_DATA_FLAG}")
}

/// Page path with an optional query string.
fn path_with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
