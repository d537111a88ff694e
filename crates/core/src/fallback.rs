//! Static datasets substituted wholesale when the backend is unreachable.

use crate::domain::order::{OrderRecord, OrderStatus};
use crate::domain::series::{ProductSalesRecord, TimeSeriesPoint, TrafficShare};
use crate::domain::stats::StatsSnapshot;
use crate::domain::user::{Role, UserRecord};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn stats() -> StatsSnapshot {
    StatsSnapshot {
        total_revenue: 124_592.0,
        active_users: 2849,
        total_orders: 1247,
        conversion_rate: 3.2,
    }
}

pub fn revenue_series() -> Vec<TimeSeriesPoint> {
    [
        ("Jan", 45_000.0, 850.0, 320.0),
        ("Feb", 52_000.0, 920.0, 380.0),
        ("Mar", 48_000.0, 780.0, 295.0),
        ("Apr", 65_000.0, 1100.0, 450.0),
        ("May", 58_000.0, 980.0, 385.0),
        ("Jun", 72_000.0, 1250.0, 520.0),
        ("Jul", 68_000.0, 1180.0, 485.0),
        ("Aug", 75_000.0, 1350.0, 550.0),
        ("Sep", 62_000.0, 1050.0, 420.0),
        ("Oct", 58_000.0, 950.0, 375.0),
        ("Nov", 70_000.0, 1200.0, 510.0),
        ("Dec", 85_000.0, 1500.0, 650.0),
    ]
    .into_iter()
    .map(|(period, revenue, users, orders)| TimeSeriesPoint {
        period: period.to_string(),
        revenue,
        users,
        orders,
    })
    .collect()
}

pub fn sales() -> Vec<ProductSalesRecord> {
    [
        ("Product A", 8500.0, 3200.0),
        ("Product B", 6200.0, 2800.0),
        ("Product C", 9800.0, 4100.0),
        ("Product D", 5400.0, 2200.0),
        ("Product E", 7600.0, 3500.0),
    ]
    .into_iter()
    .map(|(name, sales, profit)| ProductSalesRecord {
        name: name.to_string(),
        sales,
        profit,
    })
    .collect()
}

pub fn users() -> Vec<UserRecord> {
    [
        (1, "John Doe", "john.doe@example.com", Role::Admin, 15),
        (2, "Jane Smith", "jane.smith@example.com", Role::User, 14),
        (3, "Mike Johnson", "mike.johnson@example.com", Role::Admin, 16),
        (4, "Sarah Wilson", "sarah.wilson@example.com", Role::User, 13),
        (5, "David Brown", "david.brown@example.com", Role::User, 12),
        (6, "Lisa Anderson", "lisa.anderson@example.com", Role::Admin, 17),
    ]
    .into_iter()
    .map(|(id, name, email, role, day)| UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        last_login: august_2024(day),
    })
    .collect()
}

pub fn orders() -> Vec<OrderRecord> {
    [
        (1, "Customer A", 29999, OrderStatus::Completed, 15),
        (2, "Customer B", 59950, OrderStatus::Active, 16),
        (3, "Customer C", 89900, OrderStatus::Pending, 14),
        (4, "Customer D", 15075, OrderStatus::Completed, 13),
        (5, "Customer E", 129999, OrderStatus::Cancelled, 12),
        (6, "Customer F", 45025, OrderStatus::Active, 17),
        (7, "Customer G", 75000, OrderStatus::Pending, 11),
        (8, "Customer H", 32550, OrderStatus::Completed, 10),
    ]
    .into_iter()
    .map(|(id, customer, cents, status, day)| OrderRecord {
        id,
        order_number: format!("ORD-{}", 1000 + id),
        customer: customer.to_string(),
        amount: Decimal::new(cents, 2),
        status,
        order_date: august_2024(day),
    })
    .collect()
}

/// Device breakdown for the overview pie; the backend has no endpoint for it.
pub fn traffic_sources() -> Vec<TrafficShare> {
    [("Desktop", 45), ("Mobile", 35), ("Tablet", 15), ("Other", 5)]
        .into_iter()
        .map(|(name, value)| TrafficShare {
            name: name.to_string(),
            value,
        })
        .collect()
}

fn august_2024(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, day).unwrap_or_default()
}
