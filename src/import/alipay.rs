use super::fields::{self, INCOME};
use super::{HeaderPolicy, Source};
use crate::error::ImportError;
use crate::ir::{NormalizedRecord, RawRow};

const DATETIME: usize = 0;
const CATEGORY: usize = 1;
const COUNTERPARTY: usize = 2;
const ITEM: usize = 4;
const IO_TYPE: usize = 5;
const AMOUNT: usize = 6;
const INSTRUMENT: usize = 7;
const STATUS: usize = 8;
const COMMENT: usize = 11;

/// "Not counted as income or expense"
const NEUTRAL: &str = "不计收支";

/// Alipay transaction export.
pub struct Alipay;

#[derive(Debug, PartialEq, Eq)]
enum Neutral {
    Drop(&'static str),
    Refund,
    Keep,
}

fn classify_neutral(item: &str, status: &str, instrument: &str) -> Neutral {
    if item.starts_with("余额宝") {
        Neutral::Drop("yield payout")
    } else if item.starts_with("花呗自动还款") {
        Neutral::Drop("automatic repayment")
    } else if item == "转账收款到余额宝" || item == "充值-普通充值" {
        Neutral::Drop("transfer into sub-wallet")
    } else if status == "交易关闭" || status == "已关闭" {
        Neutral::Drop("closed")
    } else if status == "芝麻免押下单成功" || status == "解冻成功" || status == "冻结成功" {
        Neutral::Drop("deposit hold")
    } else if instrument.starts_with("支付宝小荷包") {
        Neutral::Drop("aggregator wallet")
    } else if status == "退款成功" {
        Neutral::Refund
    } else {
        Neutral::Keep
    }
}

impl Source for Alipay {
    const HEADER_POLICY: HeaderPolicy = HeaderPolicy::Stop;

    fn is_header(first_field: &str) -> bool {
        first_field.starts_with("交易时间")
    }

    fn normalize_row(row: &RawRow) -> Result<Option<NormalizedRecord>, ImportError> {
        let item = fields::text(row, ITEM)?;
        let status = fields::text(row, STATUS)?;
        let instrument = fields::text(row, INSTRUMENT)?;
        let mut io_type = row.field(IO_TYPE)?;

        if io_type == NEUTRAL {
            match classify_neutral(&item, &status, &instrument) {
                Neutral::Drop(reason) => {
                    log::debug!("Skipping Alipay row ({reason}): {row}");
                    return Ok(None);
                }
                Neutral::Refund => io_type = INCOME,
                Neutral::Keep => {}
            }
        }

        let (date, time) = fields::datetime(row, DATETIME)?;
        let direction = fields::direction(io_type, row)?;
        Ok(Some(NormalizedRecord {
            date,
            time,
            category: fields::text(row, CATEGORY)?,
            counterparty: fields::text(row, COUNTERPARTY)?,
            item,
            comment: fields::text(row, COMMENT)?,
            instrument,
            status,
            direction,
            amount: fields::amount(row, AMOUNT)?,
        }))
    }

    fn self_keyword(record: &NormalizedRecord) -> String {
        record.instrument.clone()
    }

    fn other_keyword(record: &NormalizedRecord) -> String {
        [
            record.category.as_str(),
            record.counterparty.as_str(),
            record.comment.as_str(),
        ]
        .concat()
    }

    fn payee(record: &NormalizedRecord) -> Option<String> {
        Some(record.counterparty.clone())
    }

    fn narration(record: &NormalizedRecord) -> String {
        format!(
            "{} {} {} {}",
            record.category,
            record.item,
            record.comment,
            record.time.format("%H:%M:%S"),
        )
    }
}
