use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn script_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bill_core_cli").expect("binary builds");
    cmd.env("BILL_CORE_CLI_SCRIPT", "1")
        .env("BILL_CORE_HOME", home.path());
    cmd
}

#[test]
fn help_lists_the_command_set() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("upcoming"))
        .stdout(predicate::str::contains("playground"))
        .stdout(predicate::str::contains("income"));
}

#[test]
fn version_reports_build_metadata() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bill Core"))
        .stdout(predicate::str::contains("Build hash"));
}

#[test]
fn full_flow_projects_a_recurring_bill() {
    let home = TempDir::new().unwrap();
    let script = "income set monthly 2020-01-01 50000\n\
                  bill add recurring Rent monthly 1 2020-01-05 17500\n\
                  bill list\n\
                  upcoming 2\n\
                  exit\n";
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Income profile saved."))
        .stdout(predicate::str::contains("Bill added."))
        .stdout(predicate::str::contains("Rent"))
        .stdout(predicate::str::contains("Pay period"))
        .stdout(predicate::str::contains("Balance"));
}

#[test]
fn book_persists_between_sessions() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("income set weekly 2020-01-03 800\nbill add single Rego 2030-06-06 90\n")
        .assert()
        .success();

    script_command(&home)
        .write_stdin("bill list\nincome show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rego"))
        .stdout(predicate::str::contains("Weekly"));
}

#[test]
fn playground_flow_is_ephemeral() {
    let home = TempDir::new().unwrap();
    let script = "income set fortnightly 2020-01-03 1600\n\
                  playground clone\n\
                  playground add single Holiday 2030-01-15 2500\n\
                  playground list\n\
                  playground view 1\n\
                  exit\n";
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Playground seeded"))
        .stdout(predicate::str::contains("Holiday"));

    // A new session starts with no playground and an untouched book.
    script_command(&home)
        .write_stdin("playground list\nbill list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Playground not started"))
        .stdout(predicate::str::contains("No bills registered."));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("upcomming\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command"))
        .stdout(predicate::str::contains("upcoming"));
}

#[test]
fn invalid_input_is_reported_without_aborting_the_session() {
    let home = TempDir::new().unwrap();
    script_command(&home)
        .write_stdin("income set monthly not-a-date\nhelp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("not a date"))
        .stdout(predicate::str::contains("Commands"));
}
