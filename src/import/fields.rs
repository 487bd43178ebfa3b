use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::error::ImportError;
use crate::ir::{Direction, RawRow};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values of the income/expense column shared by Alipay and WeChat exports.
pub const EXPENSE: &str = "支出";
pub const INCOME: &str = "收入";

/// Free text ends up inside double quotes in the ledger.
pub fn quote_safe(text: &str) -> String {
    text.replace('"', "'")
}

pub fn text(row: &RawRow, index: usize) -> Result<String, ImportError> {
    row.field(index).map(quote_safe)
}

pub fn is_blank(row: &RawRow, index: usize) -> Result<bool, ImportError> {
    Ok(strip_currency(row.field(index)?).is_empty())
}

fn strip_currency(value: &str) -> &str {
    value.trim_matches(|c: char| c == '¥' || c == '￥' || c.is_whitespace())
}

/// Magnitude of an amount cell like `¥1,234.50`.
pub fn amount(row: &RawRow, index: usize) -> Result<Decimal, ImportError> {
    let value = row.field(index)?;
    let content = strip_currency(value).replace(',', "");
    Decimal::from_str_exact(&content)
        .map(|amount| amount.abs())
        .map_err(|_| ImportError::InvalidAmount {
            value: value.to_string(),
            row: row.clone(),
        })
}

pub fn datetime(row: &RawRow, index: usize) -> Result<(NaiveDate, NaiveTime), ImportError> {
    let value = row.field(index)?;
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map(|datetime| (datetime.date(), datetime.time()))
        .map_err(|_| invalid_timestamp(value, row))
}

pub fn date(row: &RawRow, index: usize, format: &str) -> Result<NaiveDate, ImportError> {
    let value = row.field(index)?;
    NaiveDate::parse_from_str(value, format).map_err(|_| invalid_timestamp(value, row))
}

pub fn time(row: &RawRow, index: usize, format: &str) -> Result<NaiveTime, ImportError> {
    let value = row.field(index)?;
    NaiveTime::parse_from_str(value, format).map_err(|_| invalid_timestamp(value, row))
}

fn invalid_timestamp(value: &str, row: &RawRow) -> ImportError {
    ImportError::InvalidTimestamp {
        value: value.to_string(),
        row: row.clone(),
    }
}

pub fn direction(io_type: &str, row: &RawRow) -> Result<Direction, ImportError> {
    match io_type {
        EXPENSE => Ok(Direction::Outbound),
        INCOME => Ok(Direction::Inbound),
        _ => Err(ImportError::Classification {
            value: io_type.to_string(),
            row: row.clone(),
        }),
    }
}
