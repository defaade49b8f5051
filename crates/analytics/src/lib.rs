// In crates/analytics/src/lib.rs

pub mod behavior;
pub mod derive;
pub mod engine;
pub mod insights;
pub mod metrics;
pub mod segmentation;
pub mod types;

pub use behavior::compute_behavior;
pub use derive::derive_trade;
pub use engine::{AnalyticsEngine, SegmentDimension};
pub use insights::{SegmentComparator, compare_segments, generate_insight};
pub use metrics::compute_metrics;
pub use segmentation::{group_by, segment_by, segment_by_column};
pub use types::{
    AnalysisReport, BehaviorStats, Metric, MetricValue, MetricsResult, SegmentMap, SegmentTable,
};

#[cfg(test)]
mod test_support;
