use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

const RECORD_R1: &str = "purchase --farmer R1 --location Valle --date 2024-03-01 --boxes 10 \
                         --buy 2 --sell 3 --packaging Caja --crop Mango --client Central";

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fruit_ledger_cli").unwrap();
    cmd.env("FRUIT_LEDGER_CLI_SCRIPT", "1")
        .env("FRUIT_LEDGER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn cli_with_file(dir: &TempDir) -> Command {
    let mut cmd = cli(dir.path());
    cmd.arg("--file").arg(dir.path().join("compras.xlsx"));
    cmd
}

#[test]
fn purchase_is_recorded_and_listed() {
    let dir = tempdir().unwrap();
    let input = format!("{RECORD_R1}\npurchases\nexit\n");

    cli_with_file(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Purchase recorded: total cost $20.00, gross profit $10.00"))
        .stdout(contains("Total purchased    : $20.00"))
        .stdout(contains("Total boxes        : 10"))
        .stdout(contains("2024-03-01"));

    assert!(dir.path().join("compras.xlsx").exists());
}

#[test]
fn farmer_balance_reflects_payments() {
    let dir = tempdir().unwrap();
    let input = "purchase --farmer R1 --location Valle --date 2024-03-01 --boxes 50 --buy 2 \
                 --sell 3 --crop Mango --client Central\n\
                 payment --farmer R1 --date 2024-03-05 --amount 40\n\
                 farmer R1\n";

    cli_with_file(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Payment recorded."))
        .stdout(contains("Total purchased     : $100.00"))
        .stdout(contains("Total paid          : $40.00 (1 payments)"))
        .stdout(contains("Outstanding balance : $60.00"));
}

#[test]
fn records_persist_between_sessions() {
    let dir = tempdir().unwrap();
    cli_with_file(&dir)
        .write_stdin(format!("{RECORD_R1}\n"))
        .assert()
        .success();

    cli_with_file(&dir)
        .write_stdin("purchases\n")
        .assert()
        .success()
        .stdout(contains("Central"))
        .stdout(contains("$20.00"));
}

#[test]
fn incomplete_purchase_warns_and_saves_nothing() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin("purchase --farmer R1 --boxes 3\npurchases\n")
        .assert()
        .success()
        .stdout(contains(
            "Please complete all required fields (missing or invalid fields: location, crop, client).",
        ))
        .stdout(contains("No purchases recorded yet."));

    assert!(!dir.path().join("compras.xlsx").exists());
}

#[test]
fn payments_need_an_existing_farmer() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin("payment --farmer R1 --amount 5\n")
        .assert()
        .success()
        .stdout(contains("No farmers found."));

    cli_with_file(&dir)
        .write_stdin(format!("{RECORD_R1}\npayment --farmer R9 --amount 5\npayments\n"))
        .assert()
        .success()
        .stdout(contains("unknown farmer `R9`"))
        .stdout(contains("No payments recorded yet."));
}

#[test]
fn negative_payment_is_rejected() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin(format!("{RECORD_R1}\npayment --farmer R1 --amount -5\npayments\n"))
        .assert()
        .success()
        .stdout(contains("invalid amount `-5`"))
        .stdout(contains("No payments recorded yet."));
}

#[test]
fn analysis_respects_filters() {
    let dir = tempdir().unwrap();
    let input = format!(
        "{RECORD_R1}\n\
         purchase --farmer R2 --location Costa --date 2024-03-02 --boxes 4 --buy 1 --sell 2 \
         --crop Papaya --client Sur\n\
         analysis --farmer R2\n"
    );

    cli_with_file(&dir)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Purchases          : 1"))
        .stdout(contains("Total boxes        : 4"))
        .stdout(contains("Papaya"))
        .stdout(contains("Gross profit by farmer"))
        .stdout(contains("R1 |").not());
}

#[test]
fn unknown_commands_suggest_the_closest_match() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin("purchse\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `purchse`"))
        .stdout(contains("Suggestion: `purchase`?"));
}

#[test]
fn help_lists_commands() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin("help\nhelp farmer\n")
        .assert()
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("payments"))
        .stdout(contains("Usage: farmer [<ra>]"));
}

#[test]
fn farmer_without_id_in_script_mode_is_a_usage_error() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin("farmer\n")
        .assert()
        .success()
        .stdout(contains("usage: farmer <ra>"));
}

#[test]
fn config_controls_data_file_and_currency() {
    let home = tempdir().unwrap();
    std::fs::write(
        home.path().join("config.json"),
        r#"{ "data_file": "ventas.xlsx", "currency_symbol": "S/" }"#,
    )
    .unwrap();

    cli(home.path())
        .write_stdin(format!("{RECORD_R1}\n"))
        .assert()
        .success()
        .stdout(contains("total cost S/20.00"));

    assert!(home.path().join("ventas.xlsx").exists());
}

#[test]
fn default_data_file_lives_in_the_app_directory() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin(format!("{RECORD_R1}\n"))
        .assert()
        .success();

    assert!(home.path().join("Reporte de compra de fruta.xlsx").exists());
}

#[test]
fn unexpected_startup_argument_fails() {
    let dir = tempdir().unwrap();

    cli(dir.path())
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(contains("unexpected argument `--bogus`"));
}

#[test]
fn reload_reports_rows_on_disk() {
    let dir = tempdir().unwrap();
    cli_with_file(&dir)
        .write_stdin(format!("{RECORD_R1}\n"))
        .assert()
        .success();

    cli_with_file(&dir)
        .write_stdin("reload\n")
        .assert()
        .success()
        .stdout(contains("1 purchases, 0 payments."));
}

#[test]
fn purchase_dated_before_1900_is_refused() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin(
            "purchase --farmer R1 --location Valle --date 1025-03-01 --boxes 1 --buy 1 --sell 2 \
             --crop Mango --client Central\npurchases\n",
        )
        .assert()
        .success()
        .stdout(contains("date `1025-03-01` is out of range"))
        .stdout(contains("No purchases recorded yet."));

    assert!(!dir.path().join("compras.xlsx").exists());
}

#[test]
fn early_1900_purchase_reads_back_with_its_date() {
    let dir = tempdir().unwrap();
    cli_with_file(&dir)
        .write_stdin(
            "purchase --farmer R1 --location Valle --date 1900-01-15 --boxes 1 --buy 1 --sell 2 \
             --crop Mango --client Central\n",
        )
        .assert()
        .success();

    cli_with_file(&dir)
        .write_stdin("purchases\n")
        .assert()
        .success()
        .stdout(contains("1900-01-15"));
}

#[test]
fn options_of_another_command_are_rejected() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin(format!("{RECORD_R1}\npurchases --farmer R1\nhelp analysis\n"))
        .assert()
        .success()
        .stdout(contains("unknown option `--farmer`"))
        .stdout(contains("Options: --farmer, --crop, --client"));
}

#[test]
fn exit_stops_reading_the_script() {
    let dir = tempdir().unwrap();

    cli_with_file(&dir)
        .write_stdin(format!("exit\n{RECORD_R1}\n"))
        .assert()
        .success()
        .stdout(contains("Purchase recorded").not());

    assert!(!dir.path().join("compras.xlsx").exists());
}

#[test]
fn config_set_is_saved_and_used_next_session() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin(format!(
            "config set currency S/\nconfig set data_file ventas.xlsx\n{RECORD_R1}\nconfig\n"
        ))
        .assert()
        .success()
        .stdout(contains("Saved currency = S/."))
        .stdout(contains("total cost S/20.00"))
        .stdout(contains("Currency    : S/"));

    assert!(home.path().join("config.json").exists());
    assert!(home.path().join("ventas.xlsx").exists());
    assert!(!home.path().join("Reporte de compra de fruta.xlsx").exists());

    cli(home.path())
        .write_stdin("purchases\n")
        .assert()
        .success()
        .stdout(contains("Total purchased    : S/20.00"));
}

#[test]
fn config_rejects_unknown_keys() {
    let home = tempdir().unwrap();

    cli(home.path())
        .write_stdin("config set colour red\n")
        .assert()
        .success()
        .stdout(contains("unknown config key `colour`"));

    assert!(!home.path().join("config.json").exists());
}

#[test]
fn explicit_data_file_leaves_the_app_directory_alone() {
    let dir = tempdir().unwrap();
    let home = dir.path().join("app");
    let data = dir.path().join("x.xlsx");

    cli(&home)
        .arg("--file")
        .arg(&data)
        .write_stdin(format!("{RECORD_R1}\n"))
        .assert()
        .success();

    assert!(data.exists());
    assert!(!home.exists());
}
