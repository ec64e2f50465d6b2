//! Account model and operations.
//!
//! Maintains the invariant: `balance >= 0` at all times, enforced by the
//! unsigned balance and by rejecting withdrawals larger than the balance.

use crate::error::{AtmError, Result};
use crate::ledger::{EntryKind, LedgerEntry};
use log::debug;

/// Smallest amount accepted by a withdrawal.
pub const MIN_WITHDRAWAL: i64 = 100;

/// The single account served by the terminal.
///
/// # Invariants
///
/// - Balance only changes through `deposit` and `withdraw`
/// - The transaction log is append-only and chronological
/// - Only the current PIN is kept
#[derive(Debug, Clone)]
pub struct Account {
    balance: u64,
    pin: i64,
    history: Vec<LedgerEntry>,
}

impl Account {
    /// Creates an account with the given opening balance and PIN and an
    /// empty transaction log.
    pub fn new(initial_balance: u64, pin: i64) -> Self {
        Account {
            balance: initial_balance,
            pin,
            history: Vec::new(),
        }
    }

    /// Returns the current balance.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Deposits funds into the account.
    ///
    /// Returns the deposited amount. Non-positive amounts are rejected with
    /// `InvalidAmount` and leave the account untouched.
    pub fn deposit(&mut self, amount: i64) -> Result<u64> {
        if amount <= 0 {
            return Err(AtmError::InvalidAmount { amount });
        }

        let amount = amount as u64;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::BalanceOverflow)?;
        self.record(EntryKind::Deposit, amount);
        debug!("Deposited {}, balance now {}", amount, self.balance);

        Ok(amount)
    }

    /// Withdraws funds from the account.
    ///
    /// Returns the withdrawn amount, or:
    /// - `InvalidAmount` if `amount < MIN_WITHDRAWAL` (nothing is logged)
    /// - `InsufficientFunds` if `amount > balance` (a failed attempt is logged)
    pub fn withdraw(&mut self, amount: i64) -> Result<u64> {
        if amount < MIN_WITHDRAWAL {
            return Err(AtmError::InvalidAmount { amount });
        }

        let amount = amount as u64;
        if amount > self.balance {
            self.record(EntryKind::FailedWithdrawal, amount);
            debug!(
                "Withdrawal of {} refused, balance is {}",
                amount, self.balance
            );
            return Err(AtmError::InsufficientFunds {
                requested: amount,
                balance: self.balance,
            });
        }

        self.balance -= amount;
        self.record(EntryKind::Withdrawal, amount);
        debug!("Withdrew {}, balance now {}", amount, self.balance);

        Ok(amount)
    }

    /// Returns `true` if `input` equals the current PIN.
    pub fn validate_pin(&self, input: i64) -> bool {
        self.pin == input
    }

    /// Replaces the PIN. Any integer is accepted.
    pub fn change_pin(&mut self, new_pin: i64) {
        self.pin = new_pin;
        debug!("PIN changed");
    }

    /// Returns the transaction log in chronological order, or `None` if no
    /// transactions have been recorded.
    pub fn history(&self) -> Option<&[LedgerEntry]> {
        if self.history.is_empty() {
            None
        } else {
            Some(&self.history)
        }
    }

    fn record(&mut self, kind: EntryKind, amount: u64) {
        self.history.push(LedgerEntry::new(kind, amount, self.balance));
    }
}
