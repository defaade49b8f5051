// In crates/analytics/src/types.rs

use core_types::AttributeValue;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A statistic that may be undefined, e.g. an average over an empty subset
/// or a ratio with a zero denominator.
///
/// Serializes as a JSON number when defined and as `null` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricValue {
    Defined(Decimal),
    Undefined,
}

impl MetricValue {
    pub fn value(self) -> Option<Decimal> {
        match self {
            MetricValue::Defined(value) => Some(value),
            MetricValue::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }

    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            MetricValue::Defined(value) => MetricValue::Defined(f(value)),
            MetricValue::Undefined => MetricValue::Undefined,
        }
    }

    /// Combines two values; the result is undefined if either side is or if
    /// `f` overflows.
    pub fn zip_with(self, other: Self, f: impl FnOnce(Decimal, Decimal) -> Option<Decimal>) -> Self {
        match (self, other) {
            (MetricValue::Defined(a), MetricValue::Defined(b)) => f(a, b).into(),
            _ => MetricValue::Undefined,
        }
    }

    /// Rounds half-to-even to `dp` decimal places.
    pub fn round_dp(self, dp: u32) -> Self {
        self.map(|value| value.round_dp(dp))
    }
}

impl From<Option<Decimal>> for MetricValue {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(MetricValue::Undefined, MetricValue::Defined)
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        MetricValue::Defined(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Defined(value) => write!(f, "{}", value),
            MetricValue::Undefined => write!(f, "undefined"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value().and_then(|value| value.to_f64()) {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_none(),
        }
    }
}

/// Aggregate performance statistics for one set of trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsResult {
    pub total_trades: usize,
    /// Fraction of trades with strictly positive P&L, in `[0, 1]`.
    #[serde(with = "rust_decimal::serde::float")]
    pub win_rate: Decimal,
    pub avg_win: MetricValue,
    /// Average losing P&L as a non-negative magnitude.
    pub avg_loss: MetricValue,
    pub expectancy: MetricValue,
    /// Gross profit over gross loss. Undefined when there are no losses.
    pub profit_factor: MetricValue,
}

impl MetricsResult {
    pub fn get(&self, metric: Metric) -> MetricValue {
        match metric {
            Metric::TotalTrades => MetricValue::Defined(Decimal::from(self.total_trades)),
            Metric::WinRate => MetricValue::Defined(self.win_rate),
            Metric::AvgWin => self.avg_win,
            Metric::AvgLoss => self.avg_loss,
            Metric::Expectancy => self.expectancy,
            Metric::ProfitFactor => self.profit_factor,
        }
    }
}

/// Names one field of [`MetricsResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalTrades,
    WinRate,
    AvgWin,
    AvgLoss,
    #[default]
    Expectancy,
    ProfitFactor,
}

/// Metrics per distinct attribute value. Iteration order carries no meaning.
pub type SegmentMap<K> = HashMap<K, Option<MetricsResult>>;

/// A segment map with a stable key order, as embedded in a report.
pub type SegmentTable = BTreeMap<AttributeValue, Option<MetricsResult>>;

/// Mean holding times, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct BehaviorStats {
    pub avg_holding_time: Option<f64>,
    pub avg_win_hold_time: Option<f64>,
    pub avg_loss_hold_time: Option<f64>,
}

/// The full output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// `None` when there were no trades at all.
    pub overall: Option<MetricsResult>,
    /// Dimension name -> attribute value -> metrics.
    pub segmentation: BTreeMap<String, SegmentTable>,
    pub behavior: BehaviorStats,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_dimensions: Vec<String>,
}
