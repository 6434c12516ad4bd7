//! Dataset summary command.

use nexus_admin::api::{ApiError, MockApi};

/// Log the size of every dataset in the store.
///
/// # Errors
///
/// Returns `ApiError` if any accessor fails.
pub async fn run(api: &MockApi) -> Result<(), ApiError> {
    let (notifications, customers, analytics, sales, profile) = tokio::try_join!(
        api.get_notifications(),
        api.get_customers(),
        api.get_analytics(),
        api.get_sales(),
        api.get_user_profile(),
    )?;

    tracing::info!(count = notifications.len(), "Notifications");
    tracing::info!(count = customers.len(), "Customers");
    tracing::info!(top_pages = analytics.top_pages.len(), "Analytics");
    tracing::info!(
        transactions = sales.transactions.len(),
        net_profit = sales.financials.net_profit,
        "Sales"
    );
    tracing::info!(name = %profile.full_name(), role = %profile.role, "Operator profile");
    Ok(())
}
