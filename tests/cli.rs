use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn expense(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense").unwrap();
    cmd.env("EXPENSE_LEDGER_DIR", dir.path()).env_remove("RUST_LOG");
    cmd
}

fn seed(dir: &TempDir) {
    expense(dir)
        .args(["add", "Coffee", "3.50", "Dining"])
        .assert()
        .success()
        .stdout(contains("Added exp-1"));
    expense(dir)
        .args(["add", "Rent", "1200", "Housing"])
        .assert()
        .success();
}

#[test]
fn add_and_list() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Coffee").and(contains("$3.50")).and(contains("$1200.00")));
}

#[test]
fn invalid_amount_fails() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["add", "Coffee", "0", "Dining"])
        .assert()
        .failure()
        .stderr(contains("Validation error"));
}

#[test]
fn alias_flag_applies_for_one_run() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["--alias", "Dining=Food", "list", "--category", "Food"])
        .assert()
        .success()
        .stdout(contains("Coffee").and(contains("Rent").not()));

    expense(&dir)
        .args(["list", "--category", "Food"])
        .assert()
        .success()
        .stdout(contains("No expenses found."));
}

#[test]
fn bad_date_is_reported() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["list", "--start", "not-a-date"])
        .assert()
        .failure()
        .stderr(contains("not-a-date"));
}

#[test]
fn delete_by_position() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["delete", "0"])
        .assert()
        .success()
        .stdout(contains("Coffee"));
    expense(&dir)
        .args(["delete", "5"])
        .assert()
        .failure()
        .stderr(contains("No expense at position 5"));
    expense(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Rent").and(contains("Coffee").not()));
}

#[test]
fn export_to_file_and_stdout() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    let output = dir.path().join("out.csv");

    expense(&dir)
        .arg("export")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Exported 2 expense(s)"));
    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("date,description,amount,category\n"));

    expense(&dir)
        .args(["export", "--category", "Housing"])
        .assert()
        .success()
        .stdout(contains("\"Rent\"").and(contains("\"amount\": 1200.0")));
}

#[test]
fn export_nothing_fails() {
    let dir = TempDir::new().unwrap();
    expense(&dir)
        .args(["export", "--format", "csv"])
        .assert()
        .failure()
        .stderr(contains("Nothing to export"));
}

#[test]
fn chart_and_categories() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["--alias", "Housing=Home", "categories"])
        .assert()
        .success()
        .stdout("Dining\nHome\n");
    expense(&dir)
        .args(["chart", "--kind", "pie"])
        .assert()
        .success()
        .stdout(contains("Dining").and(contains("%")));
    expense(&dir)
        .args(["chart", "--csv"])
        .assert()
        .success()
        .stdout(contains("category,amount,count,percentage"));
}

#[test]
fn reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir).arg("reset").assert().failure();
    expense(&dir)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted 2 expense(s)."));
    expense(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No expenses found."));
}

#[test]
fn persisted_aliases_survive_runs() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["config", "--persist-aliases", "true"])
        .assert()
        .success()
        .stdout(contains("Persist aliases:       true"));
    expense(&dir)
        .args(["combine", "Dining", "Food"])
        .assert()
        .success();
    expense(&dir)
        .args(["list", "--category", "Food"])
        .assert()
        .success()
        .stdout(contains("Coffee"));
}

#[test]
fn show_prints_one_expense() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    expense(&dir)
        .args(["--alias", "Dining=Food", "show", "0"])
        .assert()
        .success()
        .stdout(
            contains("Description: Coffee")
                .and(contains("$3.50"))
                .and(contains("Food (recorded as Dining)")),
        );
    expense(&dir)
        .args(["show", "--id", "exp-2"])
        .assert()
        .success()
        .stdout(contains("Description: Rent"));
    expense(&dir)
        .args(["show", "5"])
        .assert()
        .failure()
        .stderr(contains("No expense at position 5"));
}
