//! In-memory data source for the dashboard.
//!
//! [`MockApi`] stands in for a remote backend. Every accessor is async and
//! resolves with an `Arc` pointing at the shared seeded dataset, so repeated
//! calls are cheap and observe the same allocation. Optional latency and an
//! offline switch (see [`ApiConfig`]) let the loading and failure paths of the
//! views be exercised.

mod fixtures;

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use nexus_core::{
    AnalyticsSnapshot, Customer, Notification, OverviewStats, SalesSnapshot, UserProfile,
};

use crate::config::ApiConfig;

pub use fixtures::{FixtureError, Fixtures};

/// Errors returned by the data source.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend could not be reached.
    #[error("{resource} unavailable: data source is offline")]
    Unavailable { resource: &'static str },

    /// The seeded data failed validation.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),
}

/// Async accessors over the seeded datasets.
#[derive(Debug, Clone)]
pub struct MockApi {
    fixtures: Arc<Fixtures>,
    config: ApiConfig,
}

impl MockApi {
    /// Create a data source over the seeded fixtures.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Fixture` if the seeded data is malformed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::with_fixtures(Fixtures::seeded()?, config))
    }

    /// Create a data source over caller-provided fixtures.
    #[must_use]
    pub fn with_fixtures(fixtures: Fixtures, config: ApiConfig) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
            config,
        }
    }

    /// Whether accessors are currently failing.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.config.offline
    }

    /// Headline gauges for the overview page.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_overview_stats(&self) -> Result<Arc<OverviewStats>, ApiError> {
        self.respond("overview stats", &self.fixtures.overview_stats)
            .await
    }

    /// Activity feed in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_notifications(&self) -> Result<Arc<Vec<Notification>>, ApiError> {
        self.respond("notifications", &self.fixtures.notifications)
            .await
    }

    /// All customers.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Arc<Vec<Customer>>, ApiError> {
        self.respond("customers", &self.fixtures.customers).await
    }

    /// Traffic analytics.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_analytics(&self) -> Result<Arc<AnalyticsSnapshot>, ApiError> {
        self.respond("analytics", &self.fixtures.analytics).await
    }

    /// Financials and recent transactions.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_sales(&self) -> Result<Arc<SalesSnapshot>, ApiError> {
        self.respond("sales", &self.fixtures.sales).await
    }

    /// Profile of the operator.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` in offline mode.
    #[instrument(skip(self))]
    pub async fn get_user_profile(&self) -> Result<Arc<UserProfile>, ApiError> {
        self.respond("user profile", &self.fixtures.profile).await
    }

    async fn respond<T>(&self, resource: &'static str, data: &Arc<T>) -> Result<Arc<T>, ApiError> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if self.config.offline {
            tracing::warn!(resource, "data source offline");
            return Err(ApiError::Unavailable { resource });
        }

        Ok(Arc::clone(data))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn api() -> MockApi {
        MockApi::new(ApiConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_accessors_share_the_same_allocation() {
        let api = api();
        let first = api.get_customers().await.unwrap();
        let second = api.get_customers().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_overview_stats_values() {
        let stats = api().get_overview_stats().await.unwrap();
        assert_eq!(stats.revenue, 54230);
        assert_eq!(stats.users, 2450);
        assert_eq!(stats.bounce_rate, 42);
        assert_eq!(stats.server_load, 34);
    }

    #[tokio::test]
    async fn test_profile_is_alex() {
        let profile = api().get_user_profile().await.unwrap();
        assert_eq!(profile.full_name(), "Alex Johnson");
        assert_eq!(profile.role, "Administrator");
    }

    #[tokio::test]
    async fn test_offline_mode_fails_every_accessor() {
        let api = MockApi::new(ApiConfig {
            offline: true,
            ..ApiConfig::default()
        })
        .unwrap();

        assert!(api.is_offline());
        assert!(api.get_overview_stats().await.is_err());
        assert!(api.get_notifications().await.is_err());
        assert!(api.get_customers().await.is_err());
        assert!(api.get_analytics().await.is_err());
        assert!(api.get_sales().await.is_err());
        let err = api.get_user_profile().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "user profile unavailable: data source is offline"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_resolution() {
        let api = MockApi::new(ApiConfig {
            latency: Duration::from_millis(250),
            offline: false,
        })
        .unwrap();

        let started = tokio::time::Instant::now();
        api.get_sales().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
