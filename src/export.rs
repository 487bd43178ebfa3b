use crate::ir::{Transaction, LEDGER_CURRENCY};

const INDENT: &str = "    ";
const SEPARATOR: &str = "\n\n";

/// One ledger entry per transaction, in the same order.
pub fn compose(transactions: &[Transaction]) -> Vec<String> {
    transactions.iter().map(compose_entry).collect()
}

fn compose_entry(transaction: &Transaction) -> String {
    let payee = match &transaction.payee {
        Some(payee) => format!("\"{payee}\" "),
        None => String::new(),
    };
    let mut entry = format!(
        "{} {} {payee}\"{}\"",
        transaction.date,
        transaction.flag.as_char(),
        transaction.narration,
    );
    for leg in [&transaction.credit, &transaction.debit] {
        entry.push_str(&format!(
            "\n{INDENT}{}{INDENT}{} {LEDGER_CURRENCY}",
            leg.account, leg.amount
        ));
    }
    entry
}

pub fn render_document(source_name: &str, entries: &[String]) -> String {
    let mut document = format!("; Imported from {source_name}\n\n");
    if !entries.is_empty() {
        document.push_str(&entries.join(SEPARATOR));
        document.push('\n');
    }
    document
}
