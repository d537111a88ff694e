use serde::{Deserialize, Serialize};

/// Point-in-time aggregate counters shown on the overview cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_revenue: f64,
    pub active_users: u64,
    pub total_orders: u64,
    /// Percentage, e.g. `3.2` for "3.2%".
    #[serde(with = "percent")]
    pub conversion_rate: f64,
}

// The backend sends the rate as a display string ("3.2%"); accept bare numbers too.
mod percent {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value}%"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("invalid percentage {s:?}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_percent_string_and_number() {
        let v = json!({
            "totalRevenue": 124592,
            "activeUsers": 2849,
            "totalOrders": 1247,
            "conversionRate": "3.2%"
        });
        let parsed: StatsSnapshot = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.conversion_rate, 3.2);
        assert_eq!(parsed.total_revenue, 124592.0);

        let v = json!({
            "totalRevenue": 1.5,
            "activeUsers": 1,
            "totalOrders": 1,
            "conversionRate": 4.75
        });
        let parsed: StatsSnapshot = serde_json::from_value(v).unwrap();
        assert_eq!(parsed.conversion_rate, 4.75);
    }

    #[test]
    fn serializes_rate_as_display_string() {
        let s = StatsSnapshot {
            total_revenue: 10.0,
            active_users: 2,
            total_orders: 3,
            conversion_rate: 3.2,
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["conversionRate"], "3.2%");
    }

    #[test]
    fn rejects_garbage_rate() {
        let v = json!({
            "totalRevenue": 1,
            "activeUsers": 1,
            "totalOrders": 1,
            "conversionRate": "high"
        });
        assert!(serde_json::from_value::<StatsSnapshot>(v).is_err());
    }
}
