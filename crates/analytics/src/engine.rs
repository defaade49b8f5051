use crate::behavior::compute_behavior;
use crate::insights::SegmentComparator;
use crate::metrics::compute_metrics;
use crate::segmentation::segment_by_column;
use crate::types::{AnalysisReport, SegmentTable};
use core_types::Trade;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// One way of slicing the trades: a report name and the attribute to group by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDimension {
    pub name: String,
    pub column: String,
}

impl SegmentDimension {
    pub fn new(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
        }
    }

    /// Trend, volatility, direction, time of day and day of week.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("trend", "trend"),
            Self::new("volatility", "volatility"),
            Self::new("direction", "direction"),
            Self::new("time_of_day", "time_of_day_bucket"),
            Self::new("day_of_week", "day_of_week"),
        ]
    }
}

/// The engine responsible for assembling a full report from trade data.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    dimensions: Vec<SegmentDimension>,
    comparator: SegmentComparator,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            dimensions: SegmentDimension::defaults(),
            comparator: SegmentComparator::default(),
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, dimensions: Vec<SegmentDimension>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_comparator(mut self, comparator: SegmentComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn dimensions(&self) -> &[SegmentDimension] {
        &self.dimensions
    }

    /// Calculates overall metrics, per-dimension segment metrics and holding
    /// time behavior for a set of trades.
    ///
    /// A dimension whose attribute is missing from the trades is left out of
    /// the report and listed in `skipped_dimensions`; the rest still complete.
    pub fn analyze(&self, trades: &[Trade]) -> AnalysisReport {
        tracing::info!(
            trades = trades.len(),
            dimensions = self.dimensions.len(),
            "Analyzing trades..."
        );

        let overall = compute_metrics(trades);
        if overall.is_none() {
            tracing::warn!("No trades to analyze; overall metrics are unavailable.");
        }

        // Dimensions are independent; results are collected in input order.
        let segmented: Vec<_> = self
            .dimensions
            .par_iter()
            .map(|dimension| segment_by_column(trades, &dimension.column))
            .collect();

        let mut segmentation = BTreeMap::new();
        let mut insights = Vec::new();
        let mut skipped_dimensions = Vec::new();

        for (dimension, result) in self.dimensions.iter().zip(segmented) {
            match result {
                Ok(segments) => {
                    let table: SegmentTable = segments.into_iter().collect();
                    let category = dimension.name.replace('_', " ");
                    if let Some(insight) = self.comparator.insight(&table, &category) {
                        insights.push(insight);
                    }
                    segmentation.insert(dimension.name.clone(), table);
                }
                Err(e) => {
                    tracing::warn!(
                        dimension = %dimension.name,
                        column = %dimension.column,
                        error = %e,
                        "Skipping segmentation dimension."
                    );
                    skipped_dimensions.push(dimension.name.clone());
                }
            }
        }

        let report = AnalysisReport {
            overall,
            segmentation,
            behavior: compute_behavior(trades),
            insights,
            skipped_dimensions,
        };

        tracing::info!(
            segmented = report.segmentation.len(),
            skipped = report.skipped_dimensions.len(),
            "Finished analysis."
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_trade;
    use crate::types::Metric;
    use core_types::AttributeValue;
    use rust_decimal_macros::dec;

    fn tagged_trades() -> Vec<Trade> {
        let rows = [
            (dec!(100), "UP", "morning", "Monday"),
            (dec!(-30), "DOWN", "afternoon", "Monday"),
            (dec!(50), "DOWN", "morning", "Tuesday"),
            (dec!(-20), "UP", "afternoon", "Tuesday"),
        ];
        rows.iter()
            .map(|(pnl, trend, bucket, day)| {
                let mut trade = make_trade(*pnl, trend, 2);
                trade.extra.insert("time_of_day_bucket".into(), AttributeValue::text(*bucket));
                trade.extra.insert("day_of_week".into(), AttributeValue::text(*day));
                trade
            })
            .collect()
    }

    #[test]
    fn test_full_report() {
        let trades = tagged_trades();
        let report = AnalyticsEngine::new().analyze(&trades);

        let overall = report.overall.as_ref().unwrap();
        assert_eq!(overall.total_trades, 4);
        assert_eq!(report.segmentation.len(), 5);
        assert!(report.skipped_dimensions.is_empty());

        let trend = &report.segmentation["trend"];
        assert_eq!(trend.len(), 2);
        let up = trend[&AttributeValue::text("UP")].as_ref().unwrap();
        assert_eq!(up, &compute_metrics(trades.iter().filter(|t| t.context.trend == AttributeValue::text("UP"))).unwrap());

        assert_eq!(report.behavior.avg_holding_time, Some(7200.0));
    }

    #[test]
    fn test_missing_dimension_is_skipped() {
        let trades: Vec<Trade> = tagged_trades()
            .into_iter()
            .map(|mut t| {
                t.extra.remove("day_of_week");
                t
            })
            .collect();
        let report = AnalyticsEngine::new().analyze(&trades);

        assert_eq!(report.skipped_dimensions, vec!["day_of_week".to_string()]);
        assert!(!report.segmentation.contains_key("day_of_week"));
        assert_eq!(report.segmentation.len(), 4);
    }

    #[test]
    fn test_blank_bucket_keeps_dimension() {
        let mut trades = tagged_trades();
        trades[3].extra.insert("time_of_day_bucket".into(), AttributeValue::text(""));
        let report = AnalyticsEngine::new().analyze(&trades);

        assert!(report.skipped_dimensions.is_empty());
        let buckets = &report.segmentation["time_of_day"];
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[&AttributeValue::text("")].as_ref().unwrap().total_trades, 1);
        assert_eq!(buckets[&AttributeValue::text("afternoon")].as_ref().unwrap().total_trades, 1);
    }

    #[test]
    fn test_empty_trades() {
        let report = AnalyticsEngine::new()
            .with_dimensions(vec![SegmentDimension::new("trend", "trend")])
            .analyze(&[]);

        assert_eq!(report.overall, None);
        assert!(report.segmentation["trend"].is_empty());
        assert_eq!(report.behavior.avg_holding_time, None);
    }

    #[test]
    fn test_insights_use_comparator() {
        let trades = tagged_trades();
        let report = AnalyticsEngine::new()
            .with_dimensions(vec![SegmentDimension::new("time_of_day", "time_of_day_bucket")])
            .with_comparator(SegmentComparator::new(Metric::WinRate, 0.15))
            .analyze(&trades);

        assert_eq!(
            report.insights,
            vec!["You perform significantly better in morning time of day compared to afternoon.".to_string()]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let trades = vec![make_trade(dec!(10), "UP", 1), make_trade(dec!(20), "UP", 3)];
        let report = AnalyticsEngine::new()
            .with_dimensions(vec![SegmentDimension::new("trend", "trend")])
            .analyze(&trades);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["overall"]["profit_factor"].is_null());
        assert_eq!(json["segmentation"]["trend"]["UP"]["total_trades"], 2);
        assert_eq!(json["behavior"]["avg_holding_time"], 7200.0);
        assert!(json["behavior"]["avg_loss_hold_time"].is_null());
        assert!(json.get("skipped_dimensions").is_none());
    }
}
