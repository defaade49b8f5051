// In crates/analytics/src/metrics.rs

use crate::types::{MetricValue, MetricsResult};
use core_types::Trade;
use rust_decimal::Decimal;

const WIN_RATE_DP: u32 = 3;
const VALUE_DP: u32 = 2;

/// Calculates the performance statistics for a set of trades.
///
/// Returns `None` for an empty input. A trade is a win only if its P&L is
/// strictly positive; everything else, break-even included, is a loss.
/// Accumulation is exact, so the order of `trades` never changes the result.
/// Rounding is applied only to the returned record. A value whose exact
/// computation overflows `Decimal` is reported as undefined.
pub fn compute_metrics<'a, I>(trades: I) -> Option<MetricsResult>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut total_trades = 0usize;
    let mut winning_trades = 0usize;
    // `None` once a sum has overflowed.
    let mut gross_profit = Some(Decimal::ZERO);
    // Signed: sum of non-positive P&L.
    let mut losing_pnl = Some(Decimal::ZERO);

    for trade in trades {
        total_trades += 1;
        if trade.pnl > Decimal::ZERO {
            winning_trades += 1;
            gross_profit = gross_profit.and_then(|sum| sum.checked_add(trade.pnl));
        } else {
            losing_pnl = losing_pnl.and_then(|sum| sum.checked_add(trade.pnl));
        }
    }

    if total_trades == 0 {
        return None;
    }
    let losing_trades = total_trades - winning_trades;

    let win_rate = Decimal::from(winning_trades) / Decimal::from(total_trades);
    let avg_win = mean(gross_profit, winning_trades);
    let avg_loss = mean(losing_pnl, losing_trades).map(|avg| avg.abs());

    // Expectancy = (WinRate * AvgWin) - (LossRate * AvgLoss)
    let loss_rate = Decimal::ONE - win_rate;
    let expectancy = avg_win.zip_with(avg_loss, |win, loss| {
        win_rate.checked_mul(win)?.checked_sub(loss_rate.checked_mul(loss)?)
    });

    // A zero denominator is the conceptual infinity of a set without losses.
    let profit_factor: MetricValue = gross_profit
        .zip(losing_pnl)
        .and_then(|(profit, losses)| profit.checked_div(losses.abs()))
        .into();

    Some(MetricsResult {
        total_trades,
        win_rate: win_rate.round_dp(WIN_RATE_DP),
        avg_win: avg_win.round_dp(VALUE_DP),
        avg_loss: avg_loss.round_dp(VALUE_DP),
        expectancy: expectancy.round_dp(VALUE_DP),
        profit_factor: profit_factor.round_dp(VALUE_DP),
    })
}

fn mean(sum: Option<Decimal>, count: usize) -> MetricValue {
    sum.and_then(|sum| sum.checked_div(Decimal::from(count))).into()
}
