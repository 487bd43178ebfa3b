use crate::classify::AccountMap;
use crate::error::ImportError;
use crate::import::{records, Source};
use crate::ir::{Direction, Flag, Leg, NormalizedRecord, RawRow, Transaction};

pub fn assemble<S: Source>(record: NormalizedRecord, account_map: &AccountMap) -> Transaction {
    let self_account = account_map.classify(&S::self_keyword(&record));
    let other_account = account_map.classify(&S::other_keyword(&record));
    let (credit_account, debit_account) = match record.direction {
        Direction::Outbound => (self_account, other_account),
        Direction::Inbound => (other_account, self_account),
    };

    let unknown = account_map.unknown_account();
    let flag = if credit_account == unknown || debit_account == unknown {
        log::debug!(
            "No account found for {} on {} {}",
            S::other_keyword(&record),
            record.date,
            record.time,
        );
        Flag::NeedsReview
    } else {
        Flag::Confirmed
    };

    Transaction {
        date: record.date,
        time: record.time,
        payee: S::payee(&record),
        narration: S::narration(&record),
        flag,
        credit: Leg {
            account: credit_account.to_string(),
            amount: -record.amount,
        },
        debit: Leg {
            account: debit_account.to_string(),
            amount: record.amount,
        },
    }
}

/// Normalizes and assembles a whole export, stopping at the first bad row.
pub fn convert<S: Source>(
    rows: Vec<RawRow>,
    account_map: &AccountMap,
) -> Result<Vec<Transaction>, ImportError> {
    records::<S>(rows)
        .map(|record| record.map(|record| assemble::<S>(record, account_map)))
        .collect()
}
