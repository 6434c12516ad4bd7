//! CSV export command.
//!
//! Produces the same files as the dashboard's export buttons, including the
//! search and "completed only" filters.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use nexus_admin::api::{ApiError, MockApi};
use nexus_admin::components::{CustomerQuery, TransactionQuery};
use nexus_admin::services::{CsvExport, ExportError};
use nexus_core::OverviewStats;

use crate::Dataset;

/// Errors that can occur during an export.
#[derive(Debug, Error)]
pub enum ExportCommandError {
    /// The data store failed.
    #[error("Data source error: {0}")]
    Api(#[from] ApiError),

    /// Nothing to export, or the records could not be rendered.
    #[error("{0}")]
    Export(#[from] ExportError),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Row filters from the command line.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub search: String,
    pub completed_only: bool,
}

/// Fetch `dataset` and render it as CSV.
///
/// # Errors
///
/// Returns `ExportCommandError::Export` with `ExportError::NoData` when the
/// filters leave no rows.
pub async fn build(
    api: &MockApi,
    dataset: Dataset,
    filter: &ExportFilter,
) -> Result<CsvExport, ExportCommandError> {
    let csv = match dataset {
        Dataset::Overview => {
            let stats = api.get_overview_stats().await?;
            CsvExport::build(Some(&[OverviewStats::clone(&stats)][..]), "overview_report")?
        }
        Dataset::Notifications => {
            let notifications = api.get_notifications().await?;
            CsvExport::build(Some(notifications.as_slice()), "notifications")?
        }
        Dataset::Customers => {
            let customers = api.get_customers().await?;
            let rows = CustomerQuery::new(&filter.search).apply(&customers);
            CsvExport::build(Some(rows.as_slice()), "customers")?
        }
        Dataset::Sales => {
            let sales = api.get_sales().await?;
            let rows = TransactionQuery::new(&filter.search, filter.completed_only)
                .apply(&sales.transactions);
            CsvExport::build(Some(rows.as_slice()), "sales_transactions")?
        }
    };
    Ok(csv)
}

/// Write the CSV to `output`, or to stdout.
///
/// # Errors
///
/// Returns `ExportCommandError::Io` if the destination cannot be written.
pub fn write(csv: &CsvExport, output: Option<&Path>) -> Result<(), ExportCommandError> {
    match output {
        Some(path) => {
            std::fs::write(path, csv.body())?;
            tracing::info!(path = %path.display(), file = %csv.file_name(), "Export written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", csv.body())?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nexus_admin::config::ApiConfig;

    use super::*;

    fn api() -> MockApi {
        MockApi::new(ApiConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_overview_export_has_single_row() {
        let csv = build(&api(), Dataset::Overview, &ExportFilter::default())
            .await
            .unwrap();
        assert_eq!(csv.file_name(), "overview_report.csv");
        assert_eq!(
            csv.body(),
            "revenue,users,bounceRate,serverLoad\n54230,2450,42,34"
        );
    }

    #[tokio::test]
    async fn test_sales_export_applies_filters() {
        let filter = ExportFilter {
            search: String::new(),
            completed_only: true,
        };
        let csv = build(&api(), Dataset::Sales, &filter).await.unwrap();
        assert!(csv.body().lines().skip(1).all(|line| line.ends_with("\"Completed\"")));
    }

    #[tokio::test]
    async fn test_unmatched_search_is_no_data() {
        let filter = ExportFilter {
            search: "zzz-nobody".to_string(),
            completed_only: false,
        };
        let err = build(&api(), Dataset::Customers, &filter).await.unwrap_err();
        assert!(matches!(err, ExportCommandError::Export(ExportError::NoData)));
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let api = crate::commands::connect(true).unwrap();
        let err = build(&api, Dataset::Notifications, &ExportFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportCommandError::Api(_)));
    }
}
