use crate::domain::order::{OrderRecord, OrderStatus};
use crate::domain::series::TimeSeriesPoint;
use crate::domain::user::{Role, UserRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

const ACTIVE_WINDOW_DAYS: i64 = 7;

/// Period-over-period growth in percent. Zero when the previous value is zero.
pub fn growth_percent(previous: f64, last: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    let growth = (last - previous) * 100.0 / previous;
    if growth.is_finite() {
        growth
    } else {
        0.0
    }
}

/// Growth between the last two points; zero with fewer than two.
pub fn last_period_growth(points: &[TimeSeriesPoint], field: fn(&TimeSeriesPoint) -> f64) -> f64 {
    match points {
        [.., previous, last] => growth_percent(field(previous), field(last)),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldSummary {
    pub total: f64,
    pub average: f64,
    pub growth: f64,
}

impl FieldSummary {
    pub fn over(points: &[TimeSeriesPoint], field: fn(&TimeSeriesPoint) -> f64) -> Self {
        let total: f64 = points.iter().map(field).sum();
        let average = if points.is_empty() {
            0.0
        } else {
            total / points.len() as f64
        };

        Self {
            total,
            average,
            growth: last_period_growth(points, field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PerformanceMetrics {
    pub revenue: FieldSummary,
    pub users: FieldSummary,
    pub orders: FieldSummary,
    pub revenue_per_user: f64,
}

impl PerformanceMetrics {
    pub fn from_series(points: &[TimeSeriesPoint]) -> Self {
        let revenue = FieldSummary::over(points, |p| p.revenue);
        let users = FieldSummary::over(points, |p| p.users);
        let orders = FieldSummary::over(points, |p| p.orders);

        let revenue_per_user = if users.total == 0.0 {
            0.0
        } else {
            revenue.total / users.total
        };

        Self {
            revenue,
            users,
            orders,
            revenue_per_user,
        }
    }
}

/// Trailing window of the revenue series an analytics view is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AnalyticsPeriod {
    #[serde(rename = "3months")]
    Last3Months,
    #[serde(rename = "6months")]
    Last6Months,
    #[default]
    #[serde(rename = "12months")]
    Last12Months,
}

impl AnalyticsPeriod {
    pub fn months(self) -> usize {
        match self {
            AnalyticsPeriod::Last3Months => 3,
            AnalyticsPeriod::Last6Months => 6,
            AnalyticsPeriod::Last12Months => 12,
        }
    }

    pub fn window(self, points: &[TimeSeriesPoint]) -> &[TimeSeriesPoint] {
        let skip = points.len().saturating_sub(self.months());
        &points[skip..]
    }
}

impl FromStr for AnalyticsPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3" | "3months" => Ok(AnalyticsPeriod::Last3Months),
            "6" | "6months" => Ok(AnalyticsPeriod::Last6Months),
            "12" | "12months" => Ok(AnalyticsPeriod::Last12Months),
            other => anyhow::bail!("unknown analytics period: {other} (expected 3months, 6months or 12months)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Sum of COMPLETED order amounts only.
    pub completed_revenue: Decimal,
}

impl OrderStats {
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        let mut out = Self {
            total: orders.len(),
            ..Self::default()
        };

        for order in orders {
            match order.status {
                OrderStatus::Active => out.active += 1,
                OrderStatus::Pending => out.pending += 1,
                OrderStatus::Completed => {
                    out.completed += 1;
                    out.completed_revenue += order.amount;
                }
                OrderStatus::Cancelled => out.cancelled += 1,
            }
        }

        out
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Active => self.active,
            OrderStatus::Pending => self.pending,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub admins: usize,
    pub regular: usize,
    pub active_this_week: usize,
}

impl UserStats {
    pub fn from_users(users: &[UserRecord], today: NaiveDate) -> Self {
        let active_this_week = users
            .iter()
            .filter(|u| (today - u.last_login).num_days().abs() <= ACTIVE_WINDOW_DAYS)
            .count();

        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
            regular: users.iter().filter(|u| u.role == Role::User).count(),
            active_this_week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    #[test]
    fn growth_guards_zero_previous() {
        assert_eq!(growth_percent(0.0, 100.0), 0.0);
        assert_eq!(growth_percent(0.0, 0.0), 0.0);
        assert_eq!(growth_percent(50_000.0, 65_000.0), 30.0);
        assert_eq!(growth_percent(200.0, 150.0), -25.0);
    }

    #[test]
    fn growth_needs_two_points() {
        let series = fallback::revenue_series();
        assert_eq!(last_period_growth(&series[..1], |p| p.revenue), 0.0);
        assert_eq!(last_period_growth(&[], |p| p.revenue), 0.0);
    }

    #[test]
    fn metrics_over_fallback_series() {
        let metrics = PerformanceMetrics::from_series(&fallback::revenue_series());
        assert_eq!(metrics.revenue.total, 758_000.0);
        assert_eq!(metrics.users.total, 13_110.0);
        assert_eq!(metrics.orders.total, 5_340.0);
        assert_eq!(metrics.orders.average, 445.0);
        // Nov 70000 -> Dec 85000
        assert!((metrics.revenue.growth - 21.428_571_428_571_43).abs() < 1e-9);
        assert!(metrics.revenue_per_user > 57.8 && metrics.revenue_per_user < 57.9);
    }

    #[test]
    fn empty_series_yields_zeroes() {
        assert_eq!(PerformanceMetrics::from_series(&[]), PerformanceMetrics::default());
    }

    #[test]
    fn period_window_takes_trailing_points() {
        let series = fallback::revenue_series();
        let last3 = AnalyticsPeriod::Last3Months.window(&series);
        assert_eq!(last3.len(), 3);
        assert_eq!(last3[0].period, "Oct");
        assert_eq!(AnalyticsPeriod::Last12Months.window(&series[..4]).len(), 4);
        assert_eq!("6months".parse::<AnalyticsPeriod>().unwrap(), AnalyticsPeriod::Last6Months);
        assert!("weekly".parse::<AnalyticsPeriod>().is_err());
    }

    #[test]
    fn period_serializes_to_its_parseable_name() {
        for period in [
            AnalyticsPeriod::Last3Months,
            AnalyticsPeriod::Last6Months,
            AnalyticsPeriod::Last12Months,
        ] {
            let v = serde_json::to_value(period).unwrap();
            let name = v.as_str().unwrap();
            assert_eq!(name.parse::<AnalyticsPeriod>().unwrap(), period);
        }
        assert_eq!(
            serde_json::to_value(AnalyticsPeriod::default()).unwrap(),
            "12months"
        );
    }

    #[test]
    fn order_stats_count_statuses_and_completed_revenue() {
        let stats = OrderStats::from_orders(&fallback::orders());
        assert_eq!(stats.total, 8);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.count(OrderStatus::Active), 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.completed_revenue, Decimal::new(77624, 2));
    }

    #[test]
    fn user_stats_use_a_seven_day_window() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
        let stats = UserStats::from_users(&fallback::users(), today);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.admins, 3);
        assert_eq!(stats.regular, 3);
        // 13th..17th are within 7 days of the 20th; the 12th is 8 days back.
        assert_eq!(stats.active_this_week, 5);
    }
}
