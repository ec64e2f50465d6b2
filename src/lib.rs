//! # ATM Terminal
//!
//! An interactive simulation of a single-account ATM: PIN authentication with
//! a bounded number of attempts, balance inquiry, deposit, withdrawal, PIN
//! change, and an in-memory transaction log.
//!
//! ## Design Principles
//!
//! - **Non-negative balance**: withdrawals never exceed the balance
//! - **Append-only log**: history entries are never reordered or removed
//! - **Explicit state machine**: the session moves through
//!   `Authenticating`, `MenuActive`, `Blocked` and `Terminated`
//!
//! ## Example
//!
//! ```
//! use atm_terminal::{Account, Session, SessionState};
//! use std::io::Cursor;
//!
//! let input = Cursor::new("9133\n2\n500\n6\n");
//! let mut output = Vec::new();
//! let mut session = Session::new(Account::new(2000, 9133), input, &mut output);
//! assert_eq!(session.run().unwrap(), SessionState::Terminated);
//! assert_eq!(session.account().balance(), 2500);
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod ledger;
pub mod session;

pub use account::{Account, MIN_WITHDRAWAL};
pub use config::AtmConfig;
pub use error::{AtmError, Result};
pub use ledger::{write_statement, EntryKind, LedgerEntry};
pub use session::{Event, MenuOption, Session, SessionState, MAX_PIN_ATTEMPTS};
