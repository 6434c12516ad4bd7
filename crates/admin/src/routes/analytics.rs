//! Traffic analytics page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use nexus_core::AnalyticsSnapshot;

use crate::{
    components::{AnalyticsRange, CountUpView, DataTableConfig, top_pages_table_config},
    config::CountUpConfig,
    filters,
    state::AppState,
};

/// Analytics query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// `30` or `90` days.
    pub range: Option<String>,
}

/// Headline metric card.
#[derive(Debug, Clone)]
pub struct MetricCardView {
    pub title: &'static str,
    /// Animated value, `None` for plain text metrics.
    pub counter: Option<CountUpView>,
    pub text: String,
    pub color: &'static str,
}

/// One device share bar.
#[derive(Debug, Clone)]
pub struct DeviceShareView {
    pub label: &'static str,
    pub percent: u8,
    pub color: &'static str,
}

/// One top-page row.
#[derive(Debug, Clone)]
pub struct TopPageView {
    pub path: String,
    pub views: CountUpView,
}

/// Everything rendered once the analytics are available.
#[derive(Debug, Clone)]
pub struct AnalyticsView {
    pub metrics: Vec<MetricCardView>,
    pub devices: Vec<DeviceShareView>,
    pub top_pages: Vec<TopPageView>,
}

impl AnalyticsView {
    fn new(snapshot: &AnalyticsSnapshot, count_up: CountUpConfig) -> Self {
        let stats = &snapshot.stats;

        let metrics = vec![
            MetricCardView {
                title: "Page Views",
                counter: Some(CountUpView::plain(stats.page_views, count_up)),
                text: String::new(),
                color: "blue",
            },
            MetricCardView {
                title: "Avg. Session",
                counter: None,
                text: stats.avg_session.clone(),
                color: "green",
            },
            MetricCardView {
                title: "Bounce Rate",
                counter: Some(CountUpView::new(stats.bounce_rate, "", "%", count_up)),
                text: String::new(),
                color: "purple",
            },
        ];

        let colors = ["bg-blue-500", "bg-purple-500", "bg-green-500"];
        let devices = snapshot
            .device_traffic
            .shares()
            .into_iter()
            .zip(colors)
            .map(|((label, percent), color)| DeviceShareView {
                label,
                percent,
                color,
            })
            .collect();

        let top_pages = snapshot
            .top_pages
            .iter()
            .map(|page| TopPageView {
                path: page.path.clone(),
                views: CountUpView::plain(page.views, count_up),
            })
            .collect();

        Self {
            metrics,
            devices,
            top_pages,
        }
    }
}

/// Analytics page template.
#[derive(Template, WebTemplate)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub current_path: String,
    pub range: AnalyticsRange,
    pub ranges: Vec<AnalyticsRange>,
    pub table: DataTableConfig,
    /// `None` while loading.
    pub analytics: Option<AnalyticsView>,
}

/// Analytics page handler.
///
/// The selected range is the fetch dependency: the accessor only runs again
/// when the range differs from the last fetch.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> impl IntoResponse {
    let api = state.api();
    let range = AnalyticsRange::from_param(query.range.as_deref());

    let analytics = state
        .resources()
        .analytics
        .fetch_if_changed(range, || api.get_analytics())
        .await;

    AnalyticsTemplate {
        current_path: "/analytics".to_string(),
        range,
        ranges: vec![AnalyticsRange::Last30Days, AnalyticsRange::Last90Days],
        table: top_pages_table_config(),
        analytics: analytics
            .data
            .as_deref()
            .map(|snapshot| AnalyticsView::new(snapshot, state.config().count_up)),
    }
}
