// In crates/analytics/src/behavior.rs

use crate::types::BehaviorStats;
use core_types::Trade;

/// Calculates mean holding times overall, for winners and for losers.
///
/// Winners are trades with `pnl > 0`; everything else, break-even
/// included, counts toward the losers.
pub fn compute_behavior(trades: &[Trade]) -> BehaviorStats {
    BehaviorStats {
        avg_holding_time: mean_holding_secs(trades.iter()),
        avg_win_hold_time: mean_holding_secs(trades.iter().filter(|t| t.is_win())),
        avg_loss_hold_time: mean_holding_secs(trades.iter().filter(|t| !t.is_win())),
    }
}

fn mean_holding_secs<'a>(trades: impl Iterator<Item = &'a Trade>) -> Option<f64> {
    let (count, total_millis) = trades.fold((0i64, 0i64), |(count, total), trade| {
        (count + 1, total + trade.holding_time.num_milliseconds())
    });
    if count == 0 {
        return None;
    }
    Some(total_millis as f64 / count as f64 / 1000.0)
}
