mod common;

use predicates::prelude::*;
use predicates::str::contains;

use common::{script_command, temp_home};

const SETUP: &str = "new \"Harbour Holdings\"
owner add \"Ada Moll\"
property add \"Ada Moll\" \"Quay 4\" apartment \"4 Quay Street\"
tenant add \"Ben Roe\" ben@example.com
rental add \"Quay 4\" \"Ben Roe\" 2025-01-01 950
fee add \"Quay 4\" \"Service charge\" 450 quarterly 3
fee add \"Quay 4\" Insurance 785 annual
";

#[test]
fn script_mode_runs_basic_flow() {
    let home = temp_home();
    let file = home.join("harbour.json");
    let input = format!("{SETUP}save {}\nexit\n", file.display());

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("New portfolio created: Harbour Holdings"))
        .stdout(contains("Property added: Quay 4"))
        .stdout(contains("Saved portfolio to"));

    let json = std::fs::read_to_string(&file).unwrap();
    assert!(json.contains("\"Harbour Holdings\""));
    assert!(json.contains("\"Service charge\""));
}

#[test]
fn schedule_lists_quarterly_months() {
    let home = temp_home();
    let input = format!("{SETUP}schedule \"Service charge\" 2025\nexit\n");

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Service charge - 2025 (Quarterly)"))
        .stdout(contains("January"))
        .stdout(contains("October"))
        .stdout(contains("February").not())
        .stdout(contains("1800.00 EUR"));
}

#[test]
fn due_reports_outstanding_fees() {
    let home = temp_home();
    let input = format!(
        "{SETUP}payment add \"Quay 4\" 450 2025-01-10 \"Service charge\"\ndue \"Quay 4\" 2025 1\nexit\n"
    );

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Due in January 2025"))
        .stdout(contains("1235.00 EUR"))
        .stdout(contains("785.00 EUR"));
}

#[test]
fn invalid_frequency_is_reported_and_shell_continues() {
    let home = temp_home();
    let input = format!("{SETUP}fee add \"Quay 4\" Sweep 80 specific_month 13\nfee list \"Quay 4\"\nexit\n");

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("specific month must be between 1 and 12, got 13"))
        .stdout(contains("Yearly in January"))
        .stdout(contains("Sweep").not());
}

#[test]
fn saved_portfolio_reopens_in_a_new_session() {
    let home = temp_home();
    let file = home.join("reopen.json");
    script_command(&home)
        .write_stdin(format!("{SETUP}save {}\n", file.display()))
        .assert()
        .success();

    script_command(&home)
        .write_stdin(format!("open {}\nfee list \"Quay 4\"\n", file.display()))
        .assert()
        .success()
        .stdout(contains("Opened portfolio `Harbour Holdings`"))
        .stdout(contains("Insurance"));
}

#[test]
fn unknown_command_suggests_closest() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("hlep\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `hlep`"))
        .stdout(contains("Did you mean `help`?"));
}

#[test]
fn help_and_version_are_available() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("help\nhelp fee\nversion\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("specific_month"))
        .stdout(contains("Rentbook"));
}
