// In app/src/analyzer.rs

use analytics::{AnalysisReport, AnalyticsEngine, SegmentComparator};
use anyhow::{Context, Result};
use app_config::AnalysisSettings;
use std::path::Path;

/// A segment whose trade count is too small to draw conclusions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowSample {
    pub dimension: String,
    pub segment: String,
    pub total_trades: usize,
}

pub fn build_engine(settings: &AnalysisSettings) -> AnalyticsEngine {
    AnalyticsEngine::new().with_comparator(SegmentComparator::new(
        settings.insight_metric,
        settings.insight_threshold,
    ))
}

/// Loads the trade file and runs the full analysis on it.
pub fn run_analysis(path: &Path, settings: &AnalysisSettings) -> Result<AnalysisReport> {
    let trades = data_loader::load_trades(path)
        .with_context(|| format!("Failed to load trades from {}", path.display()))?;

    let report = build_engine(settings).analyze(&trades);

    for low in low_sample_segments(&report, settings.low_sample_threshold) {
        tracing::warn!(
            dimension = %low.dimension,
            segment = %low.segment,
            trades = low.total_trades,
            "Low sample size; interpret with caution."
        );
    }

    Ok(report)
}

/// Lists every segment with `threshold` trades or fewer.
pub fn low_sample_segments(report: &AnalysisReport, threshold: u32) -> Vec<LowSample> {
    report
        .segmentation
        .iter()
        .flat_map(|(dimension, table)| {
            table.iter().filter_map(move |(segment, metrics)| {
                let total_trades = metrics.as_ref().map_or(0, |m| m.total_trades);
                (total_trades <= threshold as usize).then(|| LowSample {
                    dimension: dimension.clone(),
                    segment: segment.to_string(),
                    total_trades,
                })
            })
        })
        .collect()
}
