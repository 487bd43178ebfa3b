use super::fields;
use super::{HeaderPolicy, Source};
use crate::error::ImportError;
use crate::ir::{Direction, NormalizedRecord, RawRow};

const DATETIME: usize = 0;
const CATEGORY: usize = 1;
const COUNTERPARTY: usize = 2;
const ITEM: usize = 3;
const IO_TYPE: usize = 4;
const AMOUNT: usize = 5;
const INSTRUMENT: usize = 6;
const STATUS: usize = 7;
const COMMENT: usize = 10;

/// Added by WeChat to payments made by scanning a personal QR code.
const ITEM_BOILERPLATE: &str = "收款方备注:二维码收款";

/// WeChat Pay transaction export.
pub struct Wechat;

impl Source for Wechat {
    const HEADER_POLICY: HeaderPolicy = HeaderPolicy::Stop;

    fn is_header(first_field: &str) -> bool {
        first_field.starts_with("交易时间")
    }

    fn normalize_row(row: &RawRow) -> Result<Option<NormalizedRecord>, ImportError> {
        let category = fields::text(row, CATEGORY)?;
        if category.starts_with("转入零钱通") {
            log::debug!("Skipping WeChat row (transfer into sub-wallet): {row}");
            return Ok(None);
        }

        let item = row.field(ITEM)?;
        let item = fields::quote_safe(item.strip_prefix(ITEM_BOILERPLATE).unwrap_or(item));
        let (date, time) = fields::datetime(row, DATETIME)?;
        let direction = fields::direction(row.field(IO_TYPE)?, row)?;
        Ok(Some(NormalizedRecord {
            date,
            time,
            category,
            counterparty: fields::text(row, COUNTERPARTY)?,
            item,
            comment: fields::text(row, COMMENT)?,
            instrument: fields::text(row, INSTRUMENT)?,
            status: fields::text(row, STATUS)?,
            direction,
            amount: fields::amount(row, AMOUNT)?,
        }))
    }

    fn self_keyword(record: &NormalizedRecord) -> String {
        match record.direction {
            Direction::Outbound => record.instrument.clone(),
            Direction::Inbound => [record.instrument.as_str(), record.status.as_str()].concat(),
        }
    }

    fn other_keyword(record: &NormalizedRecord) -> String {
        match record.direction {
            Direction::Outbound => [record.counterparty.as_str(), record.item.as_str()].concat(),
            Direction::Inbound => [
                record.category.as_str(),
                record.counterparty.as_str(),
                record.item.as_str(),
            ]
            .concat(),
        }
    }

    fn payee(record: &NormalizedRecord) -> Option<String> {
        Some(record.counterparty.clone())
    }

    fn narration(record: &NormalizedRecord) -> String {
        format!(
            "{} {} {}",
            record.category,
            record.item,
            record.time.format("%H:%M:%S"),
        )
    }
}
