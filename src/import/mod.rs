use std::io::Read;
use std::marker::PhantomData;

use crate::error::ImportError;
use crate::ir::{NormalizedRecord, RawRow};

mod alipay;
mod cmb;
mod fields;
mod wechat;

pub use alipay::Alipay;
pub use cmb::CmbDebitCard;
pub use wechat::Wechat;

/// What to do when a row looks like a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Everything above the header is preamble, stop there.
    Stop,
    /// The export may repeat the header, skip it and go on.
    Skip,
}

/// One provider export layout.
pub trait Source {
    const HEADER_POLICY: HeaderPolicy;

    fn is_header(first_field: &str) -> bool;

    /// Returns `Ok(None)` for rows that don't move money and are dropped.
    fn normalize_row(row: &RawRow) -> Result<Option<NormalizedRecord>, ImportError>;

    /// Keyword for the provider's own account (payment instrument).
    fn self_keyword(record: &NormalizedRecord) -> String;

    /// Keyword for the account on the other side of the transaction.
    fn other_keyword(record: &NormalizedRecord) -> String;

    fn payee(record: &NormalizedRecord) -> Option<String>;

    fn narration(record: &NormalizedRecord) -> String;
}

pub fn load_rows(mut input_stream: impl Read) -> Result<Vec<RawRow>, ImportError> {
    let mut content = String::new();
    input_stream.read_to_string(&mut content)?;
    let content = maybe_remove_byte_order_mark(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    reader
        .records()
        .map(|record| record.map(RawRow::from).map_err(ImportError::from))
        .collect()
}

fn maybe_remove_byte_order_mark(mut content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    content
}

/// Normalized records of an export, oldest first. The export lists the newest
/// transactions first, so rows are walked from the bottom up.
pub fn records<S: Source>(rows: Vec<RawRow>) -> Records<S> {
    Records {
        rows: rows.into_iter().rev(),
        finished: false,
        _source: PhantomData,
    }
}

pub struct Records<S> {
    rows: std::iter::Rev<std::vec::IntoIter<RawRow>>,
    finished: bool,
    _source: PhantomData<S>,
}

impl<S: Source> Iterator for Records<S> {
    type Item = Result<NormalizedRecord, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        for row in self.rows.by_ref() {
            if row.is_empty() {
                continue;
            }
            if row.first().is_some_and(S::is_header) {
                match S::HEADER_POLICY {
                    HeaderPolicy::Stop => break,
                    HeaderPolicy::Skip => continue,
                }
            }
            match S::normalize_row(&row) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        self.finished = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    use super::*;
    use crate::ir::Direction;

    /// Rows are `[marker, amount]`; marker "H" is a header, "X" a dropped row.
    struct TestSource<const STOP: bool>;

    impl<const STOP: bool> Source for TestSource<STOP> {
        const HEADER_POLICY: HeaderPolicy = if STOP {
            HeaderPolicy::Stop
        } else {
            HeaderPolicy::Skip
        };

        fn is_header(first_field: &str) -> bool {
            first_field.starts_with('H')
        }

        fn normalize_row(row: &RawRow) -> Result<Option<NormalizedRecord>, ImportError> {
            if row.field(0)? == "X" {
                return Ok(None);
            }
            let amount = row.field(1)?;
            Ok(Some(NormalizedRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                category: String::new(),
                counterparty: String::new(),
                item: amount.to_string(),
                comment: String::new(),
                instrument: String::new(),
                status: String::new(),
                direction: Direction::Outbound,
                amount: Decimal::ONE,
            }))
        }

        fn self_keyword(_: &NormalizedRecord) -> String {
            String::new()
        }

        fn other_keyword(_: &NormalizedRecord) -> String {
            String::new()
        }

        fn payee(_: &NormalizedRecord) -> Option<String> {
            None
        }

        fn narration(_: &NormalizedRecord) -> String {
            String::new()
        }
    }

    fn items<const STOP: bool>(rows: Vec<RawRow>) -> Vec<String> {
        records::<TestSource<STOP>>(rows)
            .map(|record| record.unwrap().item)
            .collect()
    }

    #[test]
    fn reverses_rows() {
        let rows = vec![
            RawRow::from(["r", "3"]),
            RawRow::from(["r", "2"]),
            RawRow::from(["r", "1"]),
        ];
        assert_eq!(items::<true>(rows), vec!["1", "2", "3"]);
    }

    #[test]
    fn header_stops() {
        let rows = vec![
            RawRow::from(["r", "4"]),
            RawRow::from(["Header"]),
            RawRow::from(["r", "2"]),
            RawRow::from(["r", "1"]),
        ];
        assert_eq!(items::<true>(rows), vec!["1", "2"]);
    }

    #[test]
    fn header_skipped() {
        let rows = vec![
            RawRow::from(["r", "4"]),
            RawRow::from(["Header"]),
            RawRow::from(["r", "2"]),
            RawRow::from(["Header"]),
            RawRow::from(["r", "1"]),
        ];
        assert_eq!(items::<false>(rows), vec!["1", "2", "4"]);
    }

    #[test]
    fn empty_and_dropped_rows_skipped() {
        let rows = vec![
            RawRow::from(["r", "3"]),
            RawRow::new(vec![]),
            RawRow::from(["X", "2"]),
            RawRow::from(["", ""]),
            RawRow::from(["r", "1"]),
        ];
        assert_eq!(items::<true>(rows), vec!["1", "3"]);
    }

    #[test]
    fn header_only() {
        assert!(items::<true>(vec![RawRow::from(["Header"])]).is_empty());
        assert!(items::<false>(vec![RawRow::from(["Header"])]).is_empty());
        assert!(items::<true>(vec![]).is_empty());
    }

    #[test]
    fn error_ends_iteration() {
        let rows = vec![
            RawRow::from(["r", "3"]),
            RawRow::from(["r"]),
            RawRow::from(["r", "1"]),
        ];
        let mut records = records::<TestSource<true>>(rows);
        assert_eq!(records.next().unwrap().unwrap().item, "1");
        assert!(matches!(
            records.next(),
            Some(Err(ImportError::MissingField { index: 1, .. }))
        ));
        assert!(records.next().is_none());
    }

    #[test]
    fn load_rows_removes_byte_order_mark() {
        let input = "\u{FEFF}交易时间,金额\n2024-01-01 10:00:00,\"1,000.00\"\n\n";
        let rows = load_rows(input.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::from(["交易时间", "金额"]),
                RawRow::from(["2024-01-01 10:00:00", "1,000.00"]),
            ]
        );
    }

    #[test]
    fn load_rows_with_varying_lengths() {
        let input = "# comment\na,b,c\n";
        let rows = load_rows(input.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields().len(), 3);
    }
}
