//! Weekly revenue bar chart on the overview page.

/// Daily revenue samples, Monday first, in thousands.
pub const WEEKLY_REVENUE: [u32; 7] = [40, 65, 45, 80, 55, 90, 70];

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Period selected in the chart dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    #[default]
    Last7Days,
    Last30Days,
}

impl ChartRange {
    /// Parse the `range` query value. Anything but `30` means seven days.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("30") => Self::Last30Days,
            _ => Self::Last7Days,
        }
    }

    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Last7Days => "7",
            Self::Last30Days => "30",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
        }
    }
}

/// Period selected on the analytics page. Changing it refetches the analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsRange {
    #[default]
    Last30Days,
    Last90Days,
}

impl AnalyticsRange {
    /// Parse the `range` query value. Anything but `90` means thirty days.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("90") => Self::Last90Days,
            _ => Self::Last30Days,
        }
    }

    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Last30Days => "30",
            Self::Last90Days => "90",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last30Days => "Last 30 Days",
            Self::Last90Days => "Last 90 Days",
        }
    }
}

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: &'static str,
    /// Bar container height, percent of the chart.
    pub height: f64,
    /// Filled part, percent of the container.
    pub fill: f64,
    pub tooltip: String,
}

/// Bars for the selected range.
///
/// The 30-day view compresses heights to `h * 0.8 + 10` and scales the
/// tooltip amounts by four.
#[must_use]
pub fn revenue_bars(range: ChartRange) -> Vec<ChartBar> {
    WEEKLY_REVENUE
        .iter()
        .zip(WEEKDAYS)
        .map(|(&sample, label)| {
            let h = f64::from(sample);
            let (height, amount) = match range {
                ChartRange::Last7Days => (h, sample),
                ChartRange::Last30Days => (h.mul_add(0.8, 10.0), sample * 4),
            };
            ChartBar {
                label,
                height,
                fill: h / 2.0,
                tooltip: format!("${amount}k"),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_day_bars() {
        let bars = revenue_bars(ChartRange::Last7Days);
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[0].label, "Mon");
        assert!((bars[0].height - 40.0).abs() < f64::EPSILON);
        assert!((bars[1].fill - 32.5).abs() < f64::EPSILON);
        assert_eq!(bars[5].tooltip, "$90k");
    }

    #[test]
    fn test_thirty_day_bars_are_rescaled() {
        let bars = revenue_bars(ChartRange::Last30Days);
        assert!((bars[0].height - 42.0).abs() < 1e-9);
        assert!((bars[5].height - 82.0).abs() < 1e-9);
        assert_eq!(bars[0].tooltip, "$160k");
        assert_eq!(bars[6].label, "Sun");
    }

    #[test]
    fn test_range_from_param() {
        assert_eq!(ChartRange::from_param(Some("30")), ChartRange::Last30Days);
        assert_eq!(ChartRange::from_param(Some("7")), ChartRange::Last7Days);
        assert_eq!(ChartRange::from_param(Some("bogus")), ChartRange::Last7Days);
        assert_eq!(ChartRange::from_param(None), ChartRange::Last7Days);
        assert_eq!(ChartRange::Last30Days.param(), "30");
    }

    #[test]
    fn test_analytics_range_from_param() {
        assert_eq!(AnalyticsRange::from_param(Some("90")), AnalyticsRange::Last90Days);
        assert_eq!(AnalyticsRange::from_param(Some("7")), AnalyticsRange::Last30Days);
        assert_eq!(AnalyticsRange::from_param(None), AnalyticsRange::Last30Days);
        assert_eq!(AnalyticsRange::Last90Days.label(), "Last 90 Days");
    }
}
