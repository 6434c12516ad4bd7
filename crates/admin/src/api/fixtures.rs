//! Static records served by the in-memory data source.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use nexus_core::{
    AnalyticsSnapshot, AnalyticsStats, Customer, CustomerId, CustomerStatus, DeviceTraffic, Email,
    EmailError, Financials, Notification, NotificationId, NotificationKind, OverviewStats,
    SalesSnapshot, TopPage, Transaction, TransactionId, TransactionStatus, UserProfile,
};

const DATE_FORMAT: &str = "%b %d, %Y";

/// A fixture literal failed validation.
#[derive(Debug, Clone, Error)]
pub enum FixtureError {
    #[error("invalid customer email: {0}")]
    Email(#[from] EmailError),

    #[error("invalid transaction date: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Every dataset the dashboard can request, each behind its own `Arc`.
///
/// Accessors hand out clones of these `Arc`s, so all callers observe the same
/// allocation.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub overview_stats: Arc<OverviewStats>,
    pub notifications: Arc<Vec<Notification>>,
    pub customers: Arc<Vec<Customer>>,
    pub analytics: Arc<AnalyticsSnapshot>,
    pub sales: Arc<SalesSnapshot>,
    pub profile: Arc<UserProfile>,
}

impl Fixtures {
    /// Build the seeded datasets.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if a seeded email or date literal is malformed.
    pub fn seeded() -> Result<Self, FixtureError> {
        Ok(Self {
            overview_stats: Arc::new(overview_stats()),
            notifications: Arc::new(notifications()),
            customers: Arc::new(customers()?),
            analytics: Arc::new(analytics()),
            sales: Arc::new(sales()?),
            profile: Arc::new(profile()),
        })
    }
}

const fn overview_stats() -> OverviewStats {
    OverviewStats {
        revenue: 54230,
        users: 2450,
        bounce_rate: 42,
        server_load: 34,
    }
}

fn notifications() -> Vec<Notification> {
    let seed = [
        (1, NotificationKind::User, "New user registered", "2 min ago", "bg-blue-500"),
        (2, NotificationKind::Alert, "Server CPU high (90%)", "15 min ago", "bg-red-500"),
        (3, NotificationKind::Sale, "New sale: $120.00", "1 hour ago", "bg-emerald-500"),
        (4, NotificationKind::Message, "Support ticket #402 opened", "2 hours ago", "bg-purple-500"),
        (5, NotificationKind::Success, "Backup completed successfully", "5 hours ago", "bg-green-500"),
        (6, NotificationKind::User, "User Alex updated profile", "6 hours ago", "bg-blue-500"),
        (7, NotificationKind::Alert, "Database connection retry", "8 hours ago", "bg-orange-500"),
        (8, NotificationKind::Sale, "New sale: $450.00", "10 hours ago", "bg-emerald-500"),
    ];

    seed.into_iter()
        .map(|(id, kind, text, time, color)| Notification {
            id: NotificationId::new(id),
            kind,
            text: text.to_owned(),
            time: time.to_owned(),
            color: color.to_owned(),
        })
        .collect()
}

fn customers() -> Result<Vec<Customer>, FixtureError> {
    let seed = [
        (101, "Alice Freeman", "alice@example.com", CustomerStatus::Active, 120_050),
        (102, "Bob Smith", "bob.smith@test.co", CustomerStatus::Inactive, 0),
        (103, "Charlie Davis", "charlie@dev.io", CustomerStatus::Pending, 35_020),
        (104, "Diana Prince", "diana@amaz.on", CustomerStatus::Active, 890_000),
        (105, "Evan Wright", "evan@write.net", CustomerStatus::Active, 12_000),
        (106, "Fiona Gallagher", "fiona@shameless.tv", CustomerStatus::Banned, 5_000),
    ];

    seed.into_iter()
        .map(|(id, name, email, status, cents)| -> Result<Customer, FixtureError> {
            Ok(Customer {
                id: CustomerId::new(id),
                name: name.to_owned(),
                email: Email::parse(email)?,
                status,
                spent: Decimal::new(cents, 2),
                color: status.badge_class().to_owned(),
            })
        })
        .collect()
}

fn analytics() -> AnalyticsSnapshot {
    let top_pages = [
        ("/dashboard/overview", 24_000),
        ("/products/settings", 12_500),
        ("/profile/edit", 8_200),
        ("/reports/sales", 6_400),
    ]
    .into_iter()
    .map(|(path, views)| TopPage {
        path: path.to_owned(),
        views,
    })
    .collect();

    AnalyticsSnapshot {
        stats: AnalyticsStats {
            page_views: 894_300,
            avg_session: "4m 32s".to_owned(),
            bounce_rate: Decimal::new(325, 1),
        },
        top_pages,
        device_traffic: DeviceTraffic {
            desktop: 65,
            mobile: 28,
            tablet: 7,
        },
    }
}

fn sales() -> Result<SalesSnapshot, FixtureError> {
    let seed = [
        (1024, "Alex Morgan", "Dec 07, 2025", 12_000, TransactionStatus::Completed),
        (1023, "Sarah Connor", "Dec 06, 2025", 45_050, TransactionStatus::Processing),
        (1022, "James Bond", "Dec 06, 2025", 90_000, TransactionStatus::Completed),
        (1021, "Ellen Ripley", "Dec 05, 2025", 6_500, TransactionStatus::Failed),
        (1020, "Bruce Wayne", "Dec 05, 2025", 120_000, TransactionStatus::Completed),
    ];

    let transactions = seed
        .into_iter()
        .map(|(id, user, date, cents, status)| -> Result<Transaction, FixtureError> {
            Ok(Transaction {
                id: TransactionId::new(id),
                user: user.to_owned(),
                date: NaiveDate::parse_from_str(date, DATE_FORMAT)?,
                amount: Decimal::new(cents, 2),
                status,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SalesSnapshot {
        financials: Financials {
            net_profit: 24_500,
            gross_revenue: 68_200,
            avg_order: 124,
            refunds: Decimal::new(12, 1),
        },
        transactions,
    })
}

fn profile() -> UserProfile {
    UserProfile {
        first_name: "Alex".to_owned(),
        last_name: "Johnson".to_owned(),
        email: "alex@nexusui.com".to_owned(),
        phone: "+1 (555) 123-4567".to_owned(),
        role: "Administrator".to_owned(),
        bio: "Product Manager with 5+ years of experience in SaaS development. \
              Passionate about building user-centric interfaces and scalable backend systems."
            .to_owned(),
    }
}
