//! Overview page: headline stats, revenue chart and the notification feed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use nexus_core::{Notification, OverviewStats};

use crate::{
    components::{ChartBar, ChartRange, CountUpView, NOTIFICATIONS_PER_PAGE, Paginator, revenue_bars},
    config::CountUpConfig,
    error::AppError,
    filters,
    routes::{NO_DATA_FLAG, export_or_redirect},
    services::{CsvExport, NO_DATA_MESSAGE},
    state::AppState,
};

/// Overview query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// Notification page, starting at 1.
    pub page: Option<usize>,
    /// Chart range, `7` or `30`.
    pub range: Option<String>,
    pub error: Option<String>,
}

/// Headline stat card.
#[derive(Debug, Clone)]
pub struct StatCardView {
    pub title: &'static str,
    /// `None` renders a placeholder `0`.
    pub value: Option<CountUpView>,
    pub change: &'static str,
    pub positive: bool,
    pub icon_class: &'static str,
}

impl StatCardView {
    fn cards(stats: Option<&OverviewStats>, count_up: CountUpConfig) -> Vec<Self> {
        let counter = |value: u64, prefix: &str, suffix: &str| {
            stats.map(|_| CountUpView::new(value, prefix, suffix, count_up))
        };
        let (revenue, users, bounce_rate, server_load) = stats.map_or((0, 0, 0, 0), |s| {
            (
                s.revenue,
                s.users,
                u64::from(s.bounce_rate),
                u64::from(s.server_load),
            )
        });

        vec![
            Self {
                title: "Total Revenue",
                value: counter(revenue, "$", ""),
                change: "+12%",
                positive: true,
                icon_class: "icon-blue",
            },
            Self {
                title: "Active Users",
                value: counter(users, "", ""),
                change: "+5%",
                positive: true,
                icon_class: "icon-purple",
            },
            Self {
                title: "Bounce Rate",
                value: counter(bounce_rate, "", "%"),
                change: "-2%",
                positive: false,
                icon_class: "icon-orange",
            },
            Self {
                title: "Server Load",
                value: counter(server_load, "", "%"),
                change: "+8%",
                positive: false,
                icon_class: "icon-green",
            },
        ]
    }
}

/// Notification row view.
#[derive(Debug, Clone)]
pub struct NotificationView {
    pub text: String,
    pub time: String,
    pub color: String,
    pub glyph: &'static str,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            text: notification.text.clone(),
            time: notification.time.clone(),
            color: notification.color.clone(),
            glyph: notification.kind.glyph(),
        }
    }
}

/// Notification panel view.
#[derive(Debug, Clone, Default)]
pub struct NotificationPanelView {
    pub loading: bool,
    pub total: usize,
    pub items: Vec<NotificationView>,
    /// Current page, starting at 1.
    pub page: usize,
    pub page_count: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl NotificationPanelView {
    fn new(notifications: &[Notification], loading: bool, requested_page: usize) -> Self {
        let total = notifications.len();
        let paginator = Paginator::at(
            NOTIFICATIONS_PER_PAGE,
            requested_page.saturating_sub(1),
            total,
        );
        let page = paginator.page() + 1;

        Self {
            loading,
            total,
            items: paginator
                .slice(notifications)
                .iter()
                .map(NotificationView::from)
                .collect(),
            page,
            page_count: paginator.page_count(total),
            prev_page: paginator.has_prev().then(|| page - 1),
            next_page: paginator.has_next(total).then(|| page + 1),
        }
    }
}

/// Overview template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub stats_loading: bool,
    pub cards: Vec<StatCardView>,
    pub range: ChartRange,
    pub bars: Vec<ChartBar>,
    pub notifications: NotificationPanelView,
    pub flash_error: Option<String>,
}

/// Overview page handler.
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> impl IntoResponse {
    let api = state.api();
    let resources = state.resources();

    // Stats and feed load independently
    let (stats, notifications) = tokio::join!(
        resources.overview_stats.load(|| api.get_overview_stats()),
        resources.notifications.load(|| api.get_notifications()),
    );

    let range = ChartRange::from_param(query.range.as_deref());
    let feed = notifications.data.as_deref().map_or(&[][..], Vec::as_slice);

    DashboardTemplate {
        current_path: "/".to_string(),
        stats_loading: stats.loading && stats.is_pending(),
        cards: StatCardView::cards(stats.data.as_deref(), state.config().count_up),
        range,
        bars: revenue_bars(range),
        notifications: NotificationPanelView::new(
            feed,
            notifications.loading && notifications.is_pending(),
            query.page.unwrap_or(1),
        ),
        flash_error: (query.error.as_deref() == Some(NO_DATA_FLAG))
            .then(|| NO_DATA_MESSAGE.to_string()),
    }
}

/// Download the headline stats as `overview_report.csv`.
#[instrument(skip(state))]
pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let api = state.api();
    let stats = state
        .resources()
        .overview_stats
        .load_if_empty(|| api.get_overview_stats())
        .await;

    let records = stats.data.map(|s| vec![OverviewStats::clone(&s)]);
    export_or_redirect(
        CsvExport::build(records.as_deref(), "overview_report"),
        "/",
    )
}

#[cfg(test)]
mod tests {
    use nexus_core::{NotificationId, NotificationKind};

    use super::*;

    fn feed(n: i32) -> Vec<Notification> {
        (1..=n)
            .map(|i| Notification {
                id: NotificationId::new(i),
                kind: NotificationKind::User,
                text: format!("Event {i}"),
                time: "now".to_string(),
                color: "bg-blue-500".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_panel_second_page_of_eight() {
        let panel = NotificationPanelView::new(&feed(8), false, 2);
        assert_eq!(panel.total, 8);
        assert_eq!(panel.page, 2);
        assert_eq!(panel.page_count, 2);
        assert_eq!(panel.items.len(), 3);
        assert_eq!(panel.prev_page, Some(1));
        assert_eq!(panel.next_page, None);
    }

    #[test]
    fn test_panel_clamps_requested_page() {
        let panel = NotificationPanelView::new(&feed(6), false, 9);
        assert_eq!(panel.page, 2);
        assert_eq!(panel.items.len(), 1);
    }

    #[test]
    fn test_panel_page_zero_is_first_page() {
        let panel = NotificationPanelView::new(&feed(6), false, 0);
        assert_eq!(panel.page, 1);
        assert_eq!(panel.prev_page, None);
        assert_eq!(panel.next_page, Some(2));
    }

    #[test]
    fn test_cards_without_stats_show_placeholders() {
        let cards = StatCardView::cards(None, CountUpConfig::default());
        assert_eq!(cards.len(), 4);
        assert!(cards.iter().all(|c| c.value.is_none()));
    }

    #[test]
    fn test_cards_format_values() {
        let stats = OverviewStats {
            revenue: 54230,
            users: 2450,
            bounce_rate: 42,
            server_load: 34,
        };
        let cards = StatCardView::cards(Some(&stats), CountUpConfig::default());
        let texts: Vec<String> = cards
            .iter()
            .filter_map(|c| c.value.as_ref().map(|v| v.final_text.clone()))
            .collect();
        assert_eq!(texts, ["$54,230", "2,450", "42%", "34%"]);
        assert!(!cards[2].positive);
    }
}
