// In crates/core-types/src/rows.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{FieldValue, Record, Side, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
    StopLimit,
    TakeProfit,
    Liquidation,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::StopMarket => "stop_market",
            OrderType::StopLimit => "stop_limit",
            OrderType::TakeProfit => "take_profit",
            OrderType::Liquidation => "liquidation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwapStatus {
    Activated,
    Finished,
    Terminated,
}

impl TwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TwapStatus::Activated => "activated",
            TwapStatus::Finished => "finished",
            TwapStatus::Terminated => "terminated",
        }
    }
}

/// One order from a trader's historical order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOrder {
    pub id: String,
    pub pair: String,
    pub side: Side,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub size_usd: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub leverage: Option<Decimal>,
    #[serde(default)]
    pub reduce_only: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for HistoricalOrder {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.clone().into(),
            "pair" => self.pair.clone().into(),
            "side" => self.side.as_str().into(),
            "order_type" => self.order_type.as_str().into(),
            "status" => self.status.as_str().into(),
            "size_usd" => self.size_usd.into(),
            "price" => self.price.into(),
            "leverage" => self.leverage.into(),
            "reduce_only" => self.reduce_only.into(),
            "created_at" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// A fill produced by an order (one order may fill several times).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledOrder {
    pub id: String,
    pub pair: String,
    pub side: Side,
    pub size_usd: Decimal,
    pub price: Decimal,
    pub fee: Decimal,
    #[serde(default)]
    pub closed_pnl: Option<Decimal>,
    pub filled_at: DateTime<Utc>,
}

impl Record for FilledOrder {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.id.clone().into(),
            "pair" => self.pair.clone().into(),
            "side" => self.side.as_str().into(),
            "size_usd" => self.size_usd.into(),
            "price" => self.price.into(),
            "fee" => self.fee.into(),
            "closed_pnl" => self.closed_pnl.into(),
            "filled_at" => self.filled_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwapOrder {
    pub twap_id: String,
    pub pair: String,
    pub side: Side,
    pub size_usd: Decimal,
    pub filled_usd: Decimal,
    #[serde(default)]
    pub average_price: Option<Decimal>,
    pub duration_minutes: u32,
    pub status: TwapStatus,
    pub started_at: DateTime<Utc>,
}

impl Record for TwapOrder {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "twap_id" => self.twap_id.clone().into(),
            "pair" => self.pair.clone().into(),
            "side" => self.side.as_str().into(),
            "size_usd" => self.size_usd.into(),
            "filled_usd" => self.filled_usd.into(),
            "average_price" => self.average_price.into(),
            "duration_minutes" => self.duration_minutes.into(),
            "status" => self.status.as_str().into(),
            "started_at" => self.started_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

/// Aggregated statistics for one perp DEX, as shown in the explorer table.
///
/// `fee` and `leverage` are logical range columns backed by a min/max pair.
/// Sorting them descending ranks by the minimum, ascending by the maximum.
/// When one bound is missing the other one stands in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpDexSummary {
    pub perpdex: String,
    #[serde(default)]
    pub pairs: Vec<String>,
    #[serde(default)]
    pub volume_24h: Option<Decimal>,
    #[serde(default)]
    pub traders_24h: Option<u64>,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    #[serde(default)]
    pub min_fee: Option<Decimal>,
    #[serde(default)]
    pub max_fee: Option<Decimal>,
    #[serde(default)]
    pub min_leverage: Option<Decimal>,
    #[serde(default)]
    pub max_leverage: Option<Decimal>,
    #[serde(default)]
    pub listed_at: Option<DateTime<Utc>>,
}

impl PerpDexSummary {
    fn range_bound(min: Option<Decimal>, max: Option<Decimal>, direction: SortDirection) -> FieldValue {
        match direction {
            SortDirection::Desc => min.or(max).into(),
            SortDirection::Asc => max.or(min).into(),
        }
    }
}

impl Record for PerpDexSummary {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "perpdex" => self.perpdex.clone().into(),
            "pairs" => self.pairs.clone().into(),
            "volume_24h" => self.volume_24h.into(),
            "traders_24h" => self.traders_24h.into(),
            "open_interest" => self.open_interest.into(),
            "min_fee" => self.min_fee.into(),
            "max_fee" => self.max_fee.into(),
            "min_leverage" => self.min_leverage.into(),
            "max_leverage" => self.max_leverage.into(),
            "listed_at" => self.listed_at.into(),
            // Range columns read as their lower bound outside of sorting and
            // range filtering.
            "fee" => self.min_fee.or(self.max_fee).into(),
            "leverage" => self.min_leverage.or(self.max_leverage).into(),
            _ => return None,
        };
        Some(value)
    }

    fn sort_value(&self, name: &str, direction: SortDirection) -> Option<FieldValue> {
        match name {
            "fee" => Some(Self::range_bound(self.min_fee, self.max_fee, direction)),
            "leverage" => Some(Self::range_bound(self.min_leverage, self.max_leverage, direction)),
            _ => self.field(name),
        }
    }

    fn filterable(&self, name: &str) -> bool {
        !matches!(name, "fee" | "leverage")
    }
}
