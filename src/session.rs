//! Interactive session controller.
//!
//! Drives PIN authentication and the menu loop over line-oriented input and
//! output. Control flow is an explicit state machine: each prompt yields an
//! [`Event`] and [`SessionState::next`] decides where the session goes.

use crate::account::Account;
use crate::error::{AtmError, Result};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::num::IntErrorKind;

/// PIN attempts allowed before the card is blocked.
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// Currency marker printed in front of amounts.
const CURRENCY: &str = "Rs.";

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticating { attempts_left: u32 },
    MenuActive,
    /// PIN attempts exhausted. Terminal.
    Blocked,
    /// User chose to exit. Terminal.
    Terminated,
}

/// Outcome of one prompt, fed to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PinAccepted,
    PinRejected,
    /// A menu selection was handled (or rejected) without leaving the menu.
    OptionHandled,
    ExitSelected,
}

impl SessionState {
    /// The state a new session starts in.
    pub fn initial() -> Self {
        SessionState::Authenticating {
            attempts_left: MAX_PIN_ATTEMPTS,
        }
    }

    /// Returns `true` for `Blocked` and `Terminated`.
    pub fn is_final(&self) -> bool {
        matches!(self, SessionState::Blocked | SessionState::Terminated)
    }

    /// Transition table. Events that do not apply to a state leave it as is.
    pub fn next(self, event: Event) -> SessionState {
        match (self, event) {
            (SessionState::Authenticating { .. }, Event::PinAccepted) => SessionState::MenuActive,
            (SessionState::Authenticating { attempts_left }, Event::PinRejected) => {
                if attempts_left <= 1 {
                    SessionState::Blocked
                } else {
                    SessionState::Authenticating {
                        attempts_left: attempts_left - 1,
                    }
                }
            }
            (SessionState::MenuActive, Event::OptionHandled) => SessionState::MenuActive,
            (SessionState::MenuActive, Event::ExitSelected) => SessionState::Terminated,
            (state, _) => state,
        }
    }
}

/// The six menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CheckBalance,
    Deposit,
    Withdraw,
    ChangePin,
    ViewHistory,
    Exit,
}

impl TryFrom<i64> for MenuOption {
    type Error = AtmError;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuOption::CheckBalance),
            2 => Ok(MenuOption::Deposit),
            3 => Ok(MenuOption::Withdraw),
            4 => Ok(MenuOption::ChangePin),
            5 => Ok(MenuOption::ViewHistory),
            6 => Ok(MenuOption::Exit),
            other => Err(AtmError::InvalidMenuOption(other.to_string())),
        }
    }
}

const MENU: &str = "\nATM Menu:
1. Check Balance
2. Deposit
3. Withdraw
4. Change PIN
5. View Transaction History
6. Exit";

/// A single terminal session over one account.
pub struct Session<R, W> {
    account: Account,
    input: R,
    output: W,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session awaiting PIN entry.
    pub fn new(account: Account, input: R, output: W) -> Self {
        Session {
            account,
            input,
            output,
            state: SessionState::initial(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns a reference to the account.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Consumes the session, returning the account.
    pub fn into_account(self) -> Account {
        self.account
    }

    /// Runs until the session is blocked or terminated.
    ///
    /// Returns the final state. Fails only on I/O errors or when input ends
    /// before a final state is reached.
    pub fn run(&mut self) -> Result<SessionState> {
        info!("Session started");
        while !self.state.is_final() {
            self.step()?;
        }
        info!("Session ended in state {:?}", self.state);
        Ok(self.state)
    }

    /// Handles one prompt and applies the resulting transition.
    pub fn step(&mut self) -> Result<SessionState> {
        let event = match self.state {
            SessionState::Authenticating { attempts_left } => self.authenticate(attempts_left)?,
            SessionState::MenuActive => self.serve_menu()?,
            SessionState::Blocked | SessionState::Terminated => return Ok(self.state),
        };

        let next = self.state.next(event);
        debug!("{:?} --{:?}--> {:?}", self.state, event, next);

        match next {
            SessionState::Blocked => {
                warn!("PIN attempts exhausted, card blocked");
                writeln!(self.output, "Too many incorrect attempts. Card blocked.")?;
            }
            SessionState::MenuActive if event == Event::PinAccepted => {
                info!("PIN accepted");
            }
            _ => {}
        }

        self.state = next;
        Ok(next)
    }

    fn authenticate(&mut self, attempts_left: u32) -> Result<Event> {
        let entered = self.read_int("Enter your 4-digit PIN: ")?;
        if self.account.validate_pin(entered) {
            return Ok(Event::PinAccepted);
        }

        self.report(AtmError::PinMismatch {
            attempts_left: attempts_left.saturating_sub(1),
        })?;
        Ok(Event::PinRejected)
    }

    fn serve_menu(&mut self) -> Result<Event> {
        writeln!(self.output, "{}", MENU)?;
        let selection = self.read_int("Choose an option: ")?;

        let option = match MenuOption::try_from(selection) {
            Ok(option) => option,
            Err(e) => {
                self.report(e)?;
                return Ok(Event::OptionHandled);
            }
        };
        debug!("Menu option selected: {:?}", option);

        match option {
            MenuOption::CheckBalance => {
                writeln!(
                    self.output,
                    "Your balance is: {}{}",
                    CURRENCY,
                    self.account.balance()
                )?;
            }
            MenuOption::Deposit => {
                let amount = self.read_int("Enter amount to deposit: ")?;
                match self.account.deposit(amount) {
                    Ok(deposited) => writeln!(
                        self.output,
                        "{}{} deposited successfully.",
                        CURRENCY, deposited
                    )?,
                    Err(e) => self.report(e)?,
                }
            }
            MenuOption::Withdraw => {
                let amount = self.read_int("Enter amount to withdraw: ")?;
                match self.account.withdraw(amount) {
                    Ok(withdrawn) => writeln!(
                        self.output,
                        "{}{} withdrawn successfully.",
                        CURRENCY, withdrawn
                    )?,
                    Err(e) => self.report(e)?,
                }
            }
            MenuOption::ChangePin => {
                let new_pin = self.read_int("Enter new PIN: ")?;
                self.account.change_pin(new_pin);
                writeln!(self.output, "PIN changed successfully.")?;
            }
            MenuOption::ViewHistory => {
                writeln!(self.output, "\nTransaction History:")?;
                match self.account.history() {
                    Some(entries) => {
                        for entry in entries {
                            writeln!(self.output, "{}", entry)?;
                        }
                    }
                    None => writeln!(self.output, "No transactions available.")?,
                }
            }
            MenuOption::Exit => {
                writeln!(self.output, "Thank you for using the ATM. Goodbye!")?;
                return Ok(Event::ExitSelected);
            }
        }

        Ok(Event::OptionHandled)
    }

    /// Prints the user-facing message for a recoverable error. Any other
    /// error is handed back to the caller.
    fn report(&mut self, err: AtmError) -> Result<()> {
        let message = match &err {
            AtmError::InvalidAmount { .. } => "Enter a valid amount.".to_string(),
            AtmError::InsufficientFunds { .. } => "Insufficient funds.".to_string(),
            AtmError::BalanceOverflow => {
                "Amount exceeds what this account can hold.".to_string()
            }
            AtmError::InvalidMenuOption(_) => "Invalid option. Please try again.".to_string(),
            AtmError::PinMismatch { attempts_left } => {
                format!("Incorrect PIN. Attempts left: {}", attempts_left)
            }
            _ => return Err(err),
        };
        if matches!(err, AtmError::PinMismatch { .. }) {
            warn!("{}", err);
        } else {
            debug!("{}", err);
        }
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Prompts until a line parses as an integer.
    ///
    /// Malformed lines, including ones that are not UTF-8, are rejected with
    /// a message and the prompt repeats. End of input is `InputClosed`.
    fn read_int(&mut self, prompt: &str) -> Result<i64> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Err(AtmError::InputClosed);
            }

            // The raw line may be a mistyped PIN, so it is never logged.
            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim().parse::<i64>().map_err(|e| e.kind().clone()),
                Err(_) => Err(IntErrorKind::InvalidDigit),
            };

            match parsed {
                Ok(value) => return Ok(value),
                Err(IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                    warn!("Rejected out-of-range number");
                    writeln!(self.output, "Invalid input. That number is out of range.")?;
                }
                Err(_) => {
                    warn!("Rejected non-numeric input");
                    writeln!(self.output, "Invalid input. Please enter a whole number.")?;
                }
            }
        }
    }
}
