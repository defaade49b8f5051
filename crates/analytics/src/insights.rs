// In crates/analytics/src/insights.rs

use crate::types::{Metric, MetricsResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use std::fmt::Display;

pub const DEFAULT_INSIGHT_THRESHOLD: f64 = 0.15;

/// Picks the best and worst segment of a dimension by one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentComparator {
    pub metric: Metric,
    /// Minimum relative gap, `|best - worst| / |best|`, worth reporting.
    pub threshold: f64,
}

impl Default for SegmentComparator {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            threshold: DEFAULT_INSIGHT_THRESHOLD,
        }
    }
}

impl SegmentComparator {
    pub fn new(metric: Metric, threshold: f64) -> Self {
        Self { metric, threshold }
    }

    /// Returns `(best, worst)` when the gap between them is meaningful.
    ///
    /// Segments without metrics, or whose metric is undefined, are not ranked.
    /// Ties keep key order.
    pub fn compare<'a, K: Ord>(
        &self,
        segments: &'a BTreeMap<K, Option<MetricsResult>>,
    ) -> Option<(&'a K, &'a K)> {
        let mut ranked: Vec<(&K, Decimal)> = segments
            .iter()
            .filter_map(|(key, metrics)| {
                let value = metrics.as_ref()?.get(self.metric).value()?;
                Some((key, value))
            })
            .collect();
        if ranked.len() < 2 {
            return None;
        }

        // Stable, so equal values stay in key order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let (best, best_value) = ranked[0];
        let (worst, worst_value) = ranked[ranked.len() - 1];

        if best_value.is_zero() {
            return None;
        }
        let gap = ((best_value - worst_value).abs() / best_value.abs()).to_f64()?;
        if gap < self.threshold {
            return None;
        }

        Some((best, worst))
    }

    /// Phrases the comparison as a sentence, e.g. for the "trend" dimension.
    pub fn insight<K: Ord + Display>(
        &self,
        segments: &BTreeMap<K, Option<MetricsResult>>,
        category: &str,
    ) -> Option<String> {
        let (best, worst) = self.compare(segments)?;
        Some(format!(
            "You perform significantly better in {} {} compared to {}.",
            best, category, worst
        ))
    }
}

pub fn compare_segments<'a, K: Ord>(
    segments: &'a BTreeMap<K, Option<MetricsResult>>,
    metric: Metric,
    threshold: f64,
) -> Option<(&'a K, &'a K)> {
    SegmentComparator::new(metric, threshold).compare(segments)
}

/// Compares by expectancy with the default threshold.
pub fn generate_insight<K: Ord + Display>(
    segments: &BTreeMap<K, Option<MetricsResult>>,
    category: &str,
) -> Option<String> {
    SegmentComparator::default().insight(segments, category)
}
