//! Error types for the ATM terminal.

use thiserror::Error;

/// Result type alias for terminal operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while running the terminal.
///
/// Account and menu errors are recovered inside the session; the remaining
/// variants end the process.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Failed to read from or write to the terminal or statement file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Statement export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Deposit not positive, or withdrawal below the minimum unit
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: i64 },

    /// Withdrawal larger than the current balance
    #[error("Insufficient funds: requested {requested}, balance {balance}")]
    InsufficientFunds { requested: u64, balance: u64 },

    /// Deposit would overflow the balance
    #[error("Deposit would overflow the account balance")]
    BalanceOverflow,

    /// Entered PIN did not match
    #[error("Incorrect PIN, {attempts_left} attempts left")]
    PinMismatch { attempts_left: u32 },

    /// Menu selection outside 1..=6
    #[error("Invalid menu option: {0}")]
    InvalidMenuOption(String),

    /// Environment variable present but unparseable
    #[error("Invalid configuration value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    /// Input stream ended while a prompt was waiting
    #[error("Input closed before the session finished")]
    InputClosed,
}
