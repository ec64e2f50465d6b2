//! ATM Terminal CLI
//!
//! Runs one interactive session against a single in-memory account.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `ATM_INITIAL_BALANCE`: Opening balance (default 2000)
//! - `ATM_PIN`: Account PIN (default 9133)
//! - `ATM_STATEMENT`: Write the transaction log as CSV to this path on exit

use atm_terminal::{write_statement, Account, AtmConfig, Result, Session, SessionState};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = AtmConfig::from_env()?;
    let account = Account::new(config.initial_balance, config.pin);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(account, stdin.lock(), stdout.lock());
    let outcome = session.run()?;

    if outcome == SessionState::Terminated {
        if let Some(path) = &config.statement_path {
            let file = File::create(path)?;
            let entries = session.account().history().unwrap_or_default();
            write_statement(entries, BufWriter::new(file))?;
            info!("Statement written to {}", path.display());
        }
    }

    Ok(())
}
