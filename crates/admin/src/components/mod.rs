//! Reusable view components.
//!
//! - `chart` - Overview revenue bars and range selectors
//! - `count_up` - Animated counters
//! - `data_table` - Table configuration and row filters
//! - `pagination` - Fixed-size pages with guarded navigation

pub mod chart;
pub mod count_up;
pub mod data_table;
pub mod pagination;

pub use chart::{AnalyticsRange, ChartBar, ChartRange, revenue_bars};
pub use count_up::{CountUpAnimation, CountUpView};
pub use data_table::{
    CustomerQuery, DataTableConfig, TableColumn, TableFilter, TransactionQuery,
    customers_table_config, top_pages_table_config, transactions_table_config,
};
pub use pagination::{NOTIFICATIONS_PER_PAGE, Paginator};
