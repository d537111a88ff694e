use crate::domain::order::{OrderRecord, OrderStatus};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<OrderStatus>().map(StatusFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderQuery {
    pub status: StatusFilter,
    pub search: String,
}

impl OrderQuery {
    pub fn matches(&self, order: &OrderRecord) -> bool {
        if !self.status.matches(order.status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        order.order_number.to_lowercase().contains(&needle)
            || order.customer.to_lowercase().contains(&needle)
    }
}

/// Orders matching the status filter and the case-insensitive search term, in source order.
pub fn filter_orders<'a>(orders: &'a [OrderRecord], query: &OrderQuery) -> Vec<&'a OrderRecord> {
    orders.iter().filter(|o| query.matches(o)).collect()
}
