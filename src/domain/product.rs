use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout used by the listing API (naive, UTC)
const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Product identifier as emitted by the listing API.
///
/// The API mostly returns UUID strings, but numeric ids show up as well, so
/// both are accepted and kept in their textual form for link building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
        })
    }
}

/// Most recent price observation attached to a listed product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPrice {
    pub amount: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_api_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_discount: Option<bool>,
}

impl LatestPrice {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            fetched_at: None,
            is_discount: None,
        }
    }
}

/// Accepts the API's naive `%Y-%m-%dT%H:%M:%S.%f` layout as well as RFC 3339.
/// Anything else becomes `None`; the timestamp never affects rendering.
fn deserialize_api_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(&s, API_TIME_FORMAT)
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }))
}

/// Product record from a store listing page.
///
/// Extra fields sent by the API (`link`, `reference`, `store_id`, timestamps)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub price_count: u32,
    #[serde(default)]
    pub latest_price: Option<LatestPrice>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_count: 0,
            latest_price: None,
        }
    }

    pub fn with_prices(mut self, price_count: u32, latest_amount: f64) -> Self {
        self.price_count = price_count;
        self.latest_price = Some(LatestPrice::new(latest_amount));
        self
    }

    /// Latest price amount, only when the product actually has prices.
    ///
    /// A zero `price_count` means `latest_price` carries nothing meaningful,
    /// even if the payload happens to include one.
    pub fn latest_amount(&self) -> Option<f64> {
        if self.price_count == 0 {
            return None;
        }
        self.latest_price.as_ref().map(|p| p.amount)
    }
}

/// Request payload for one listing page: `{"page": n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
}

impl PageRequest {
    pub fn new(page: u32) -> Self {
        Self { page }
    }
}
