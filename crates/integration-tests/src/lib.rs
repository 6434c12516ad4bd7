//! Integration tests for the Nexus dashboard.
//!
//! Every test boots the real router on an ephemeral port with its own
//! [`AppState`], so sessions and cached resources never leak between tests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexus-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::{Client, redirect};
use tokio::net::TcpListener;

use nexus_admin::config::DashboardConfig;
use nexus_admin::state::AppState;

/// Login delay used by the test servers.
pub const TEST_LOGIN_DELAY: Duration = Duration::from_millis(20);

/// A running dashboard and a client that does not follow redirects.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub state: AppState,
}

impl TestContext {
    /// Start a dashboard with the profile already loaded.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Start a dashboard with `config`. The profile is loaded before
    /// returning.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn with_config(config: DashboardConfig) -> Self {
        let state = AppState::new(config).expect("Failed to create application state");
        state
            .spawn_profile_load()
            .await
            .expect("Profile load task panicked");

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = nexus_admin::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// POST a form to `path` and return the response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Sign in through the auth form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn login(&self) -> reqwest::Response {
        self.post_form(
            "/auth/login",
            &[
                ("email", "alex@nexusui.com"),
                ("password", "secret"),
                ("return_to", "/settings"),
            ],
        )
        .await
    }
}

/// Configuration for test servers: short login delay, static files from the
/// admin crate.
#[must_use]
pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        login_delay: TEST_LOGIN_DELAY,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/static").to_string(),
        ..DashboardConfig::default()
    }
}

/// `Location` header of a redirect response.
///
/// # Panics
///
/// Panics if the header is missing.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Redirect without Location header")
        .to_string()
}
