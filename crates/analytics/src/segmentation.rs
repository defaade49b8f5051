// In crates/analytics/src/segmentation.rs

use crate::metrics::compute_metrics;
use crate::types::SegmentMap;
use core_types::{AttributeValue, Error, Result, Trade};
use itertools::Itertools;
use std::collections::HashMap;
use std::hash::Hash;

/// Partitions `items` by the key each one maps to.
///
/// Every item lands in exactly one group and no group is empty.
pub fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> HashMap<K, Vec<&'a T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    items.iter().into_group_map_by(|item| key(*item))
}

/// Computes metrics independently for each group of trades sharing a key.
pub fn segment_by<K, F>(trades: &[Trade], key: F) -> SegmentMap<K>
where
    K: Eq + Hash,
    F: Fn(&Trade) -> K,
{
    group_by(trades, key)
        .into_iter()
        .map(|(value, group)| (value, compute_metrics(group)))
        .collect()
}

/// Segments trades by the exact value of a named attribute.
///
/// Fails with [`Error::UnknownAttribute`] if any trade lacks the attribute,
/// rather than returning a map that silently misses those trades.
pub fn segment_by_column(trades: &[Trade], column: &str) -> Result<SegmentMap<AttributeValue>> {
    let keys = trades
        .iter()
        .map(|trade| {
            trade
                .attribute(column)
                .ok_or_else(|| Error::UnknownAttribute(column.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let groups = keys.into_iter().zip(trades).into_group_map();
    tracing::debug!(column, groups = groups.len(), "Segmented trades.");

    Ok(groups
        .into_iter()
        .map(|(value, group)| (value, compute_metrics(group)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_trade;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trend_trades() -> Vec<Trade> {
        vec![
            make_trade(dec!(100), "UP", 2),
            make_trade(dec!(-30), "DOWN", 1),
            make_trade(dec!(50), "DOWN", 3),
            make_trade(dec!(-20), "UP", 5),
        ]
    }

    #[test]
    fn test_segment_by_trend() {
        let trades = trend_trades();
        let segments = segment_by_column(&trades, "trend").unwrap();

        assert_eq!(segments.len(), 2);
        for (value, metrics) in &segments {
            let metrics = metrics.as_ref().unwrap();
            assert_eq!(metrics.total_trades, 2);

            let subset: Vec<Trade> = trades
                .iter()
                .filter(|t| t.attribute("trend").as_ref() == Some(value))
                .cloned()
                .collect();
            assert_eq!(Some(metrics), compute_metrics(&subset).as_ref());
        }
    }

    #[test]
    fn test_unknown_column_fails() {
        let trades = trend_trades();
        let result = segment_by_column(&trades, "time_of_day_bucket");
        assert_eq!(result, Err(Error::UnknownAttribute("time_of_day_bucket".to_string())));
    }

    #[test]
    fn test_column_missing_on_some_trades_fails() {
        let mut trades = trend_trades();
        trades[0].extra.insert("day_of_week".to_string(), AttributeValue::text("Monday"));
        assert!(segment_by_column(&trades, "day_of_week").is_err());

        for trade in &mut trades {
            trade.extra.insert("day_of_week".to_string(), AttributeValue::text("Monday"));
        }
        let segments = segment_by_column(&trades, "day_of_week").unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_grouping_is_exact() {
        let mut trades = trend_trades();
        trades[0].context.trend = AttributeValue::text("up");
        let segments = segment_by_column(&trades, "trend").unwrap();

        assert_eq!(segments.len(), 3);
        assert!(segments.contains_key(&AttributeValue::text("up")));
        assert!(segments.contains_key(&AttributeValue::text("UP")));
    }

    #[test]
    fn test_numeric_attribute_grouping() {
        let mut trades = trend_trades();
        trades[0].context.rsi_value = AttributeValue::parse("70.0");
        trades[1].context.rsi_value = AttributeValue::parse("70");
        let segments = segment_by_column(&trades, "rsi_value").unwrap();

        assert_eq!(segments.len(), 2);
        let high = segments[&AttributeValue::Number(dec!(70))].as_ref().unwrap();
        assert_eq!(high.total_trades, 2);
    }

    #[test]
    fn test_segment_by_direction_and_outcome() {
        let trades = trend_trades();
        let by_direction = segment_by_column(&trades, "direction").unwrap();
        assert_eq!(by_direction.len(), 1);
        assert!(by_direction.contains_key(&AttributeValue::text("LONG")));

        let by_outcome = segment_by_column(&trades, "outcome").unwrap();
        let wins = by_outcome[&AttributeValue::text("WIN")].as_ref().unwrap();
        let losses = by_outcome[&AttributeValue::text("LOSS")].as_ref().unwrap();
        assert_eq!(wins.win_rate, dec!(1));
        assert_eq!(losses.win_rate, dec!(0));
    }

    #[test]
    fn test_partition_covers_every_trade_once() {
        let trades = trend_trades();
        let groups = group_by(&trades, |t| t.context.trend.clone());

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, trades.len());

        let mut pnls: Vec<Decimal> = groups.values().flatten().map(|t| t.pnl).collect();
        let mut expected: Vec<Decimal> = trades.iter().map(|t| t.pnl).collect();
        pnls.sort();
        expected.sort();
        assert_eq!(pnls, expected);
    }

    #[test]
    fn test_generic_key() {
        let trades = trend_trades();
        let by_long_hold = segment_by(&trades, |t| t.holding_time.num_hours() >= 3);

        assert_eq!(by_long_hold.len(), 2);
        assert_eq!(by_long_hold[&true].as_ref().unwrap().total_trades, 2);
        assert_eq!(by_long_hold[&false].as_ref().unwrap().total_trades, 2);
    }

    #[test]
    fn test_empty_input() {
        let segments = segment_by_column(&[], "trend").unwrap();
        assert!(segments.is_empty());
    }
}
