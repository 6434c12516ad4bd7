//! Application state shared across handlers.

use std::sync::Arc;

use nexus_core::{AnalyticsSnapshot, Customer, Notification, OverviewStats, SalesSnapshot};

use crate::api::{ApiError, MockApi};
use crate::components::AnalyticsRange;
use crate::config::DashboardConfig;
use crate::services::{Resource, SessionContext};

/// Fetched data behind each page, one resource per accessor.
#[derive(Debug)]
pub struct Resources {
    pub overview_stats: Resource<Arc<OverviewStats>>,
    pub notifications: Resource<Arc<Vec<Notification>>>,
    pub customers: Resource<Arc<Vec<Customer>>>,
    pub analytics: Resource<Arc<AnalyticsSnapshot>, AnalyticsRange>,
    pub sales: Resource<Arc<SalesSnapshot>>,
}

impl Resources {
    fn new() -> Self {
        Self {
            overview_stats: Resource::new("overview stats"),
            notifications: Resource::new("notifications"),
            customers: Resource::new("customers"),
            analytics: Resource::new("analytics"),
            sales: Resource::new("sales"),
        }
    }

    fn close(&self) {
        self.overview_stats.close();
        self.notifications.close();
        self.customers.close();
        self.analytics.close();
        self.sales.close();
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single
/// [`SessionContext`] of the process, created here at start-up and closed by
/// [`AppState::shutdown`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    api: MockApi,
    session: SessionContext,
    resources: Resources,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the seeded data source cannot be built.
    pub fn new(config: DashboardConfig) -> Result<Self, ApiError> {
        let api = MockApi::new(config.api)?;
        Ok(Self::with_api(config, api))
    }

    /// Create application state over an existing data source.
    #[must_use]
    pub fn with_api(config: DashboardConfig, api: MockApi) -> Self {
        let session = SessionContext::new(config.login_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                session,
                resources: Resources::new(),
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the data source.
    #[must_use]
    pub fn api(&self) -> &MockApi {
        &self.inner.api
    }

    /// Get a reference to the session.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Get a reference to the per-page resources.
    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.inner.resources
    }

    /// Start loading the operator profile in the background.
    pub fn spawn_profile_load(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            state
                .session()
                .initialize(|| state.api().get_user_profile())
                .await;
        })
    }

    /// Close the session and every resource. Results arriving later are
    /// ignored.
    pub fn shutdown(&self) {
        self.inner.session.close();
        self.inner.resources.close();
        tracing::info!("Application state closed");
    }
}
