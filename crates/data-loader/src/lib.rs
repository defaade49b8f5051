// In crates/data-loader/src/lib.rs

use analytics::derive_trade;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use core_types::{AttributeValue, Direction, MarketContext, Trade, TradeFill};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

pub mod error;

pub use error::{Error, Result};

/// Columns describing the trade itself.
pub const REQUIRED_TRADE_COLUMNS: [&str; 6] = [
    "entry_time",
    "exit_time",
    "entry_price",
    "exit_price",
    "quantity",
    "direction",
];

/// Loads and validates a trade table from a CSV file with a header row.
pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<Trade>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading trades...");
    let file = File::open(path)?;
    load_trades_from_reader(BufReader::new(file))
}

/// Loads and validates a trade table from any CSV source.
///
/// Every required column must be present in the header; all missing ones are
/// reported together. Columns beyond the required ones are kept on each
/// trade as extra attributes.
pub fn load_trades_from_reader<R: Read>(reader: R) -> Result<Vec<Trade>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let columns = validate_columns(&headers)?;

    let mut trades = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = index + 1;
        let fill = parse_fill(&record, &headers, &columns, row)?;
        let trade = derive_trade(fill).map_err(|source| Error::InvalidTrade { row, source })?;
        trades.push(trade);
    }

    tracing::info!(trades = trades.len(), "Loaded trades.");
    Ok(trades)
}

/// Maps each header name to its position, failing on any missing required column.
fn validate_columns(headers: &StringRecord) -> Result<HashMap<String, usize>> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), i))
        .collect();

    let missing: Vec<String> = REQUIRED_TRADE_COLUMNS
        .iter()
        .chain(MarketContext::COLUMNS.iter())
        .filter(|name| !columns.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }
    Ok(columns)
}

fn parse_fill(
    record: &StringRecord,
    headers: &StringRecord,
    columns: &HashMap<String, usize>,
    row: usize,
) -> Result<TradeFill> {
    let cells = Row { record, columns, row };

    let context = MarketContext {
        trend: cells.attribute("trend"),
        volatility: cells.attribute("volatility"),
        volume_level: cells.attribute("volume_level"),
        distance_from_ma: cells.attribute("distance_from_ma"),
        rsi_value: cells.attribute("rsi_value"),
        distance_from_recent_high: cells.attribute("distance_from_recent_high"),
        distance_from_recent_low: cells.attribute("distance_from_recent_low"),
    };

    let extra: BTreeMap<String, AttributeValue> = headers
        .iter()
        .zip(record.iter())
        .filter(|(name, _)| !is_known_column(name))
        .map(|(name, value)| (name.to_string(), AttributeValue::parse(value)))
        .collect();

    Ok(TradeFill {
        entry_time: cells.timestamp("entry_time")?,
        exit_time: cells.timestamp("exit_time")?,
        entry_price: cells.decimal("entry_price")?,
        exit_price: cells.decimal("exit_price")?,
        quantity: cells.decimal("quantity")?,
        direction: Direction::from_str(cells.get("direction"))
            .map_err(|_| cells.invalid("direction"))?,
        context,
        extra,
    })
}

/// Typed access to the cells of one data row.
struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
    row: usize,
}

impl<'a> Row<'a> {
    fn get(&self, column: &str) -> &'a str {
        self.columns
            .get(column)
            .and_then(|i| self.record.get(*i))
            .unwrap_or_default()
    }

    fn invalid(&self, column: &str) -> Error {
        Error::InvalidValue {
            row: self.row,
            column: column.to_string(),
            value: self.get(column).to_string(),
        }
    }

    fn attribute(&self, column: &str) -> AttributeValue {
        AttributeValue::parse(self.get(column))
    }

    fn decimal(&self, column: &str) -> Result<Decimal> {
        Decimal::from_str(self.get(column)).map_err(|_| self.invalid(column))
    }

    fn timestamp(&self, column: &str) -> Result<DateTime<Utc>> {
        parse_timestamp(self.get(column)).ok_or_else(|| self.invalid(column))
    }
}

fn is_known_column(name: &str) -> bool {
    REQUIRED_TRADE_COLUMNS.contains(&name) || MarketContext::COLUMNS.contains(&name)
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// and `YYYY-MM-DD`. Timestamps without an offset are taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
