use serde::{Deserialize, Serialize};

/// One period of the trailing revenue window. Sequences of these are chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    #[serde(rename = "month")]
    pub period: String,
    pub revenue: f64,
    pub users: f64,
    pub orders: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSalesRecord {
    pub name: String,
    pub sales: f64,
    pub profit: f64,
}

/// Share of visits per device class, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficShare {
    pub name: String,
    pub value: u32,
}
