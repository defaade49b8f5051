// In crates/core-types/src/types.rs

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The side a position was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LONG" => Ok(Direction::Long),
            "SHORT" => Ok(Direction::Short),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

/// Whether a closed trade made money. Break-even trades are losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
        }
    }
}

/// A categorical value a trade can be grouped by.
///
/// Numbers compare by decimal value, so `1.0` and `1.00` are the same key.
/// Text compares exactly (case-sensitive, no normalization).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeValue {
    Number(Decimal),
    Text(String),
}

impl AttributeValue {
    /// Interprets a raw cell: a decimal if it parses as one (plain or
    /// scientific notation), text otherwise.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
            Ok(value) => AttributeValue::Number(value),
            Err(_) => AttributeValue::Text(trimmed.to_string()),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        AttributeValue::Text(value.into())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Text(value) => write!(f, "{}", value),
        }
    }
}

// Always a string so segment maps can be JSON object keys.
impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The market conditions recorded alongside each trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketContext {
    pub trend: AttributeValue,
    pub volatility: AttributeValue,
    pub volume_level: AttributeValue,
    pub distance_from_ma: AttributeValue,
    pub rsi_value: AttributeValue,
    pub distance_from_recent_high: AttributeValue,
    pub distance_from_recent_low: AttributeValue,
}

impl MarketContext {
    /// Column names every validated trade table must carry.
    pub const COLUMNS: [&'static str; 7] = [
        "trend",
        "volatility",
        "volume_level",
        "distance_from_ma",
        "rsi_value",
        "distance_from_recent_high",
        "distance_from_recent_low",
    ];

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        match name {
            "trend" => Some(&self.trend),
            "volatility" => Some(&self.volatility),
            "volume_level" => Some(&self.volume_level),
            "distance_from_ma" => Some(&self.distance_from_ma),
            "rsi_value" => Some(&self.rsi_value),
            "distance_from_recent_high" => Some(&self.distance_from_recent_high),
            "distance_from_recent_low" => Some(&self.distance_from_recent_low),
            _ => None,
        }
    }
}

/// A closed trade as it was recorded, before any derived fields are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeFill {
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: Decimal,
    pub direction: Direction,
    pub context: MarketContext,
    /// Any further columns, e.g. `time_of_day_bucket` or `day_of_week`.
    pub extra: BTreeMap<String, AttributeValue>,
}

/// A closed trade with its direction-adjusted P&L and outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub exit_price: Decimal,
    pub quantity: Decimal,
    pub direction: Direction,
    pub context: MarketContext,
    pub extra: BTreeMap<String, AttributeValue>,

    pub pnl: Decimal,
    pub return_pct: Decimal,
    pub outcome: Outcome,
    pub holding_time: Duration,
}

impl Trade {
    /// Looks up a categorical attribute by its column name.
    ///
    /// Resolves `direction`, `outcome` and the market context columns first,
    /// then falls back to the extra columns. Returns `None` if the trade has
    /// no such attribute.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "direction" => Some(AttributeValue::text(self.direction.to_string())),
            "outcome" => Some(AttributeValue::text(self.outcome.to_string())),
            _ => self
                .context
                .get(name)
                .or_else(|| self.extra.get(name))
                .cloned(),
        }
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}
