use super::fields;
use super::{HeaderPolicy, Source};
use crate::error::ImportError;
use crate::ir::{Direction, NormalizedRecord, RawRow};

const DATE: usize = 0;
const TIME: usize = 1;
const INCOME: usize = 2;
const OUTCOME: usize = 3;
const CATEGORY: usize = 5;
const COMMENT: usize = 6;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Classifier keyword for the debit card itself.
const ACCOUNT_KEYWORD: &str = "CMB";

/// China Merchants Bank debit card statement export.
pub struct CmbDebitCard;

impl Source for CmbDebitCard {
    const HEADER_POLICY: HeaderPolicy = HeaderPolicy::Skip;

    fn is_header(first_field: &str) -> bool {
        first_field.starts_with('#') || first_field.starts_with("交易日期")
    }

    fn normalize_row(row: &RawRow) -> Result<Option<NormalizedRecord>, ImportError> {
        let category = fields::text(row, CATEGORY)?;
        // Sweeps into the card's linked money market product
        if category.starts_with("朝朝宝") {
            log::debug!("Skipping CMB row (automatic sweep): {row}");
            return Ok(None);
        }

        let (direction, amount) = if fields::is_blank(row, OUTCOME)? {
            (Direction::Inbound, fields::amount(row, INCOME)?)
        } else {
            (Direction::Outbound, fields::amount(row, OUTCOME)?)
        };
        Ok(Some(NormalizedRecord {
            date: fields::date(row, DATE, DATE_FORMAT)?,
            time: fields::time(row, TIME, TIME_FORMAT)?,
            category,
            counterparty: String::new(),
            item: String::new(),
            comment: fields::text(row, COMMENT)?,
            instrument: ACCOUNT_KEYWORD.to_string(),
            status: String::new(),
            direction,
            amount,
        }))
    }

    fn self_keyword(record: &NormalizedRecord) -> String {
        record.instrument.clone()
    }

    fn other_keyword(record: &NormalizedRecord) -> String {
        record.comment.clone()
    }

    fn payee(_record: &NormalizedRecord) -> Option<String> {
        None
    }

    fn narration(record: &NormalizedRecord) -> String {
        format!(
            "{} {} {}",
            record.time.format(TIME_FORMAT),
            record.category,
            record.comment,
        )
    }
}
