use anyhow::Result;

use crate::ir::{Flag, Transaction};

pub fn check_transactions_are_balanced(transactions: &[Transaction]) -> Result<()> {
    for transaction in transactions {
        if !transaction.is_balanced() {
            return Err(anyhow::anyhow!(
                "Transaction on date {} is not balanced: {:?}",
                transaction.date,
                transaction,
            ));
        }
    }
    Ok(())
}

pub fn count_needs_review(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .filter(|transaction| transaction.flag == Flag::NeedsReview)
        .count()
}
