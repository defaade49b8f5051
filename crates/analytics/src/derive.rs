// In crates/analytics/src/derive.rs

//! Trade-level fields computed once, before any statistic is.

use core_types::{Direction, Error, Outcome, Result, Trade, TradeFill};
use rust_decimal::Decimal;

/// Direction-adjusted profit or loss: positive means the trade made money.
///
/// Returns `None` if the result does not fit in a `Decimal`.
pub fn compute_pnl(
    direction: Direction,
    entry_price: Decimal,
    exit_price: Decimal,
    quantity: Decimal,
) -> Option<Decimal> {
    let pnl = exit_price.checked_sub(entry_price)?.checked_mul(quantity)?;
    Some(match direction {
        Direction::Long => pnl,
        Direction::Short => -pnl,
    })
}

/// P&L as a fraction of the capital put into the position.
///
/// Returns `None` on overflow or a zero position size.
pub fn compute_return_pct(pnl: Decimal, entry_price: Decimal, quantity: Decimal) -> Option<Decimal> {
    pnl.checked_div(entry_price.checked_mul(quantity)?)
}

/// Only strictly positive P&L is a win; break-even counts as a loss.
pub fn classify_outcome(pnl: Decimal) -> Outcome {
    if pnl > Decimal::ZERO { Outcome::Win } else { Outcome::Loss }
}

/// Validates a recorded fill and attaches its derived fields.
pub fn derive_trade(fill: TradeFill) -> Result<Trade> {
    if fill.entry_price <= Decimal::ZERO {
        return Err(invalid(format!("entry_price must be positive, got {}", fill.entry_price)));
    }
    if fill.exit_price <= Decimal::ZERO {
        return Err(invalid(format!("exit_price must be positive, got {}", fill.exit_price)));
    }
    if fill.quantity <= Decimal::ZERO {
        return Err(invalid(format!("quantity must be positive, got {}", fill.quantity)));
    }
    if fill.exit_time < fill.entry_time {
        return Err(invalid(format!(
            "exit_time {} is before entry_time {}",
            fill.exit_time, fill.entry_time
        )));
    }

    let pnl = compute_pnl(fill.direction, fill.entry_price, fill.exit_price, fill.quantity).ok_or_else(|| {
        invalid(format!(
            "pnl of ({} - {}) * {} is out of range",
            fill.exit_price, fill.entry_price, fill.quantity
        ))
    })?;
    let return_pct = compute_return_pct(pnl, fill.entry_price, fill.quantity).ok_or_else(|| {
        invalid(format!(
            "position size {} * {} is out of range",
            fill.entry_price, fill.quantity
        ))
    })?;

    Ok(Trade {
        holding_time: fill.exit_time - fill.entry_time,
        entry_time: fill.entry_time,
        exit_time: fill.exit_time,
        entry_price: fill.entry_price,
        exit_price: fill.exit_price,
        quantity: fill.quantity,
        direction: fill.direction,
        context: fill.context,
        extra: fill.extra,
        pnl,
        return_pct,
        outcome: classify_outcome(pnl),
    })
}

fn invalid(reason: String) -> Error {
    Error::InvalidTrade { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_fill;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_long_and_short_pnl() {
        assert_eq!(compute_pnl(Direction::Long, dec!(100), dec!(105), dec!(10)), Some(dec!(50)));
        assert_eq!(compute_pnl(Direction::Short, dec!(100), dec!(105), dec!(10)), Some(dec!(-50)));
        assert_eq!(compute_pnl(Direction::Short, dec!(100), dec!(90), dec!(2)), Some(dec!(20)));
    }

    #[test]
    fn test_return_pct() {
        assert_eq!(compute_return_pct(dec!(50), dec!(100), dec!(10)), Some(dec!(0.05)));
        assert_eq!(compute_return_pct(dec!(-20), dec!(50), dec!(4)), Some(dec!(-0.1)));
    }

    #[test]
    fn test_zero_pnl_is_a_loss() {
        assert_eq!(classify_outcome(dec!(0)), Outcome::Loss);
        assert_eq!(classify_outcome(dec!(-0.01)), Outcome::Loss);
        assert_eq!(classify_outcome(dec!(0.01)), Outcome::Win);
    }

    #[test]
    fn test_derive_trade() {
        let fill = make_fill(Direction::Short, dec!(200), dec!(190), dec!(3));
        let trade = derive_trade(fill).unwrap();

        assert_eq!(trade.pnl, dec!(30));
        assert_eq!(trade.return_pct, dec!(0.05));
        assert_eq!(trade.outcome, Outcome::Win);
        assert_eq!(trade.holding_time, Duration::hours(4));
    }

    #[test]
    fn test_derive_trade_rejects_non_positive_inputs() {
        let fill = make_fill(Direction::Long, dec!(0), dec!(10), dec!(1));
        assert!(matches!(derive_trade(fill), Err(Error::InvalidTrade { .. })));

        let fill = make_fill(Direction::Long, dec!(10), dec!(10), dec!(0));
        assert!(matches!(derive_trade(fill), Err(Error::InvalidTrade { .. })));
    }

    #[test]
    fn test_derive_trade_rejects_overflowing_pnl() {
        assert_eq!(
            compute_pnl(Direction::Long, dec!(1), dec!(10000000000000000000), dec!(100000000000000)),
            None
        );

        let fill = make_fill(Direction::Long, dec!(1), dec!(10000000000000000000), dec!(100000000000000));
        let Err(Error::InvalidTrade { reason }) = derive_trade(fill) else {
            panic!("overflowing pnl should be rejected");
        };
        assert!(reason.contains("out of range"));
    }

    #[test]
    fn test_derive_trade_rejects_exit_before_entry() {
        let mut fill = make_fill(Direction::Long, dec!(10), dec!(11), dec!(1));
        std::mem::swap(&mut fill.entry_time, &mut fill.exit_time);
        assert!(matches!(derive_trade(fill), Err(Error::InvalidTrade { .. })));
    }
}
