//! Market Record Module
//! One coin snapshot as returned by the markets endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// A single market entry. Fields beyond these are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub market_cap: f64,
    /// `None` for coins the source has not ranked yet.
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl MarketRecord {
    /// Rank filter helper: unranked coins never fall inside a tier.
    /// A missing rank is not read as 0, so it cannot pass a Top-N filter.
    pub fn rank_within(&self, limit: u32) -> bool {
        self.market_cap_rank.is_some_and(|rank| rank <= limit)
    }
}

#[cfg(test)]
pub(crate) fn record(id: &str, name: &str, price: f64, cap: f64, rank: u32) -> MarketRecord {
    MarketRecord {
        id: id.to_string(),
        name: name.to_string(),
        current_price: price,
        market_cap: cap,
        market_cap_rank: Some(rank),
        price_change_percentage_24h: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"[{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://example.invalid/btc.png",
            "current_price": 67123.5,
            "market_cap": 1320000000000,
            "market_cap_rank": 1,
            "total_volume": 1,
            "price_change_percentage_24h": -1.25
        }]"#;

        let records: Vec<MarketRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Bitcoin");
        assert_eq!(records[0].market_cap_rank, Some(1));
        assert_eq!(records[0].price_change_percentage_24h, Some(-1.25));
    }

    #[test]
    fn test_decode_coerces_nulls() {
        let body = r#"{
            "id": "newcoin",
            "name": "New Coin",
            "current_price": null,
            "market_cap": null,
            "market_cap_rank": null,
            "price_change_percentage_24h": null
        }"#;

        let record: MarketRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.current_price, 0.0);
        assert_eq!(record.market_cap, 0.0);
        assert_eq!(record.market_cap_rank, None);
        assert!(!record.rank_within(50));
    }

    #[test]
    fn test_rank_within() {
        let r = record("a", "Alpha", 1.0, 1.0, 10);
        assert!(r.rank_within(10));
        assert!(!r.rank_within(9));
    }
}
