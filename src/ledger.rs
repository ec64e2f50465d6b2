//! Transaction log entries and statement export.

use crate::error::Result;
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// What a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    /// Withdrawal rejected for insufficient funds.
    FailedWithdrawal,
}

/// A single immutable entry in the account's transaction log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    kind: EntryKind,
    amount: u64,
    balance_after: u64,
}

impl LedgerEntry {
    pub(crate) fn new(kind: EntryKind, amount: u64, balance_after: u64) -> Self {
        LedgerEntry {
            kind,
            amount,
            balance_after,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Balance once this entry was applied. Unchanged for failed withdrawals.
    pub fn balance_after(&self) -> u64 {
        self.balance_after
    }
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Deposit => write!(f, "Deposited: {}", self.amount),
            EntryKind::Withdrawal => write!(f, "Withdrew: {}", self.amount),
            EntryKind::FailedWithdrawal => {
                write!(f, "Failed Withdrawal Attempt: {}", self.amount)
            }
        }
    }
}

/// One CSV row of an exported statement.
#[derive(Debug, Serialize)]
struct StatementRecord {
    seq: usize,
    kind: EntryKind,
    amount: u64,
    balance: u64,
}

/// Writes the log as CSV, one row per entry in chronological order.
///
/// The header is always written, so an empty log yields a header-only file.
pub fn write_statement<W: Write>(entries: &[LedgerEntry], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if entries.is_empty() {
        csv_writer.write_record(["seq", "kind", "amount", "balance"])?;
    }

    for (idx, entry) in entries.iter().enumerate() {
        csv_writer.serialize(StatementRecord {
            seq: idx + 1,
            kind: entry.kind,
            amount: entry.amount,
            balance: entry.balance_after,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
