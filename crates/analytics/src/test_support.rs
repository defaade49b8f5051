// In crates/analytics/src/test_support.rs

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::{AttributeValue, Direction, MarketContext, Outcome, Trade, TradeFill};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn entry_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
}

pub fn make_context(trend: &str, volatility: &str) -> MarketContext {
    MarketContext {
        trend: AttributeValue::text(trend),
        volatility: AttributeValue::text(volatility),
        volume_level: AttributeValue::text("NORMAL"),
        distance_from_ma: AttributeValue::parse("0.5"),
        rsi_value: AttributeValue::parse("55"),
        distance_from_recent_high: AttributeValue::parse("1.2"),
        distance_from_recent_low: AttributeValue::parse("3.4"),
    }
}

pub fn make_fill(direction: Direction, entry_price: Decimal, exit_price: Decimal, quantity: Decimal) -> TradeFill {
    TradeFill {
        entry_time: entry_time(),
        exit_time: entry_time() + Duration::hours(4),
        entry_price,
        exit_price,
        quantity,
        direction,
        context: make_context("UP", "LOW"),
        extra: BTreeMap::new(),
    }
}

/// A long trade of one unit that realized exactly `pnl`, held for `hours`.
pub fn make_trade(pnl: Decimal, trend: &str, hours: i64) -> Trade {
    let entry_price = Decimal::from(1_000);
    Trade {
        entry_time: entry_time(),
        exit_time: entry_time() + Duration::hours(hours),
        entry_price,
        exit_price: entry_price + pnl,
        quantity: Decimal::ONE,
        direction: Direction::Long,
        context: make_context(trend, "LOW"),
        extra: BTreeMap::new(),
        pnl,
        return_pct: pnl / entry_price,
        outcome: if pnl > Decimal::ZERO { Outcome::Win } else { Outcome::Loss },
        holding_time: Duration::hours(hours),
    }
}

pub fn make_trades(pnls: &[Decimal]) -> Vec<Trade> {
    pnls.iter().map(|pnl| make_trade(*pnl, "UP", 1)).collect()
}
