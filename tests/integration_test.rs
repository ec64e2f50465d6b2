//! Integration tests for the ATM terminal CLI.
//!
//! These tests run the actual binary with scripted stdin and check what the
//! user would see.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

/// Build a command with the ATM environment cleared
fn atm() -> Command {
    let mut cmd = Command::cargo_bin("atm-terminal").unwrap();
    cmd.env_remove("ATM_INITIAL_BALANCE")
        .env_remove("ATM_PIN")
        .env_remove("ATM_STATEMENT");
    cmd
}

/// Run the binary with the given stdin and return stdout
fn run_session(input: &str) -> String {
    let assert = atm().write_stdin(input).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn test_full_session_scenario() {
    let output = run_session("9133\n2\n500\n3\n3000\n3\n1000\n5\n6\n");

    assert!(output.starts_with("Enter your 4-digit PIN: "));
    assert!(output.contains("Rs.500 deposited successfully."));
    assert!(output.contains("Insufficient funds."));
    assert!(output.contains("Rs.1000 withdrawn successfully."));
    assert!(output.contains(
        "Transaction History:\nDeposited: 500\nFailed Withdrawal Attempt: 3000\nWithdrew: 1000\n"
    ));
    assert!(output.ends_with("Thank you for using the ATM. Goodbye!\n"));
}

#[test]
fn test_menu_text() {
    let output = run_session("9133\n6\n");
    let expected_menu = "ATM Menu:\n1. Check Balance\n2. Deposit\n3. Withdraw\n\
                         4. Change PIN\n5. View Transaction History\n6. Exit\n\
                         Choose an option: ";
    assert!(output.contains(expected_menu));
}

#[test]
fn test_blocked_after_three_wrong_pins() {
    atm()
        .write_stdin("0000\n1234\n4321\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Too many incorrect attempts. Card blocked."))
        .stdout(predicate::str::contains("ATM Menu:").not())
        .stdout(predicate::str::contains("Your balance is").not());
}

#[test]
fn test_changed_pin_is_not_reused_across_runs() {
    run_session("9133\n4\n4321\n6\n");

    let output = run_session("9133\n1\n6\n");
    assert!(output.contains("Your balance is: Rs.2000"));
}

#[test]
fn test_malformed_input_reprompts() {
    let output = run_session("nine\n9133\nx\n1\n6\n");

    assert_eq!(
        output
            .matches("Invalid input. Please enter a whole number.")
            .count(),
        2
    );
    assert!(output.contains("Your balance is: Rs.2000"));
    assert!(!output.contains("Incorrect PIN"));
}

#[test]
fn test_input_closed_error() {
    atm()
        .write_stdin("9133\n2\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Input closed"));
}

#[test]
fn test_environment_overrides_account() {
    let assert = atm()
        .env("ATM_INITIAL_BALANCE", "50")
        .env("ATM_PIN", "1111")
        .write_stdin("1111\n1\n3\n100\n6\n")
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(output.contains("Your balance is: Rs.50"));
    assert!(output.contains("Insufficient funds."));
}

#[test]
fn test_invalid_config_error() {
    atm()
        .env("ATM_INITIAL_BALANCE", "lots")
        .write_stdin("9133\n6\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ATM_INITIAL_BALANCE"));
}

#[test]
fn test_statement_written_on_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");

    atm()
        .env("ATM_STATEMENT", &path)
        .write_stdin("9133\n2\n500\n3\n3000\n3\n1000\n6\n")
        .assert()
        .success();

    let statement = fs::read_to_string(&path).unwrap();
    assert_eq!(
        statement,
        "seq,kind,amount,balance\n\
         1,deposit,500,2500\n\
         2,failed_withdrawal,3000,2500\n\
         3,withdrawal,1000,1500\n"
    );
}

#[test]
fn test_no_statement_when_blocked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.csv");

    atm()
        .env("ATM_STATEMENT", &path)
        .write_stdin("1\n2\n3\n")
        .assert()
        .success();

    assert!(!path.exists());
}
