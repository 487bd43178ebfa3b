use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::error::ImportError;

pub const LEDGER_CURRENCY: &str = "CNY";

/// One row of a provider export, fields in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow(Vec<String>);

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// A row without any fields, or with only blank ones.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|field| field.trim().is_empty())
    }

    /// The trimmed content of column `index`.
    pub fn field(&self, index: usize) -> Result<&str, ImportError> {
        self.0
            .get(index)
            .map(|field| field.trim())
            .ok_or_else(|| ImportError::MissingField {
                index,
                row: self.clone(),
            })
    }
}

impl From<csv::StringRecord> for RawRow {
    fn from(record: csv::StringRecord) -> Self {
        Self(record.iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawRow {
    fn from(fields: [&str; N]) -> Self {
        Self(fields.iter().map(|field| field.to_string()).collect())
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Money arrives at the provider account.
    Inbound,
    /// Money leaves the provider account.
    Outbound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: String,
    pub counterparty: String,
    pub item: String,
    pub comment: String,
    pub instrument: String,
    pub status: String,
    pub direction: Direction,
    /// Always non-negative, the sign is decided by the assembler.
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Confirmed,
    NeedsReview,
}

impl Flag {
    pub fn as_char(self) -> char {
        match self {
            Flag::Confirmed => '*',
            Flag::NeedsReview => '!',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub account: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub payee: Option<String>,
    pub narration: String,
    pub flag: Flag,
    pub credit: Leg,
    pub debit: Leg,
}

impl Transaction {
    pub fn is_balanced(&self) -> bool {
        (self.credit.amount + self.debit.amount).is_zero()
    }
}
