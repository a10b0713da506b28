use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command for the cadence binary
fn cadence_cmd() -> Command {
    Command::cargo_bin("cadence").expect("Failed to find cadence binary")
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Morning review",
            "--time",
            "09:00",
            "--duration",
            "25",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Morning review"))
        .stdout(predicate::str::contains("09:00"));
}

#[test]
fn test_cli_list_empty_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));
}

#[test]
fn test_cli_list_shows_created_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args(["--database-file", db_arg, "plan", "create", "Listed plan"])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed plan"))
        .stdout(predicate::str::contains("[pending]"));
}

#[test]
fn test_cli_conflict_exits_nonzero_with_suggestion() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "Deep work",
            "--time",
            "09:00",
            "--duration",
            "60",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "Standup",
            "--time",
            "09:30",
            "--duration",
            "15",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Time conflict"))
        .stderr(predicate::str::contains("Deep work"))
        .stderr(predicate::str::contains("Next free slot: 10:00"));
}

#[test]
fn test_cli_users_are_isolated() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "--user",
            "ada",
            "plan",
            "create",
            "Ada's plan",
        ])
        .assert()
        .success();

    // Another user cannot see it
    cadence_cmd()
        .args(["--database-file", db_arg, "--user", "grace", "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found."));

    // Nor show it by ID
    cadence_cmd()
        .args(["--database-file", db_arg, "--user", "grace", "plan", "show", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not belong"));
}

#[test]
fn test_cli_snooze_moves_plan() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "Nap",
            "--time",
            "13:00",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "plan", "snooze", "1", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snoozed plan 1 to 13:45"));
}

#[test]
fn test_cli_json_output() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "--json",
            "plan",
            "create",
            "Machine readable",
            "--time",
            "3:15 pm",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Machine readable\""))
        .stdout(predicate::str::contains("\"scheduled_time\": \"15:15\""));
}

#[test]
fn test_cli_calendar_reports_rates() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "create",
            "Dated",
            "--date",
            "2024-06-01",
        ])
        .assert()
        .success();
    cadence_cmd()
        .args([
            "--database-file",
            db_arg,
            "plan",
            "update",
            "1",
            "--status",
            "completed",
        ])
        .assert()
        .success();

    cadence_cmd()
        .args(["--database-file", db_arg, "calendar", "--month", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-01"))
        .stdout(predicate::str::contains("100.00% plans"));
}

#[test]
fn test_cli_sweep_reports_stats() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "sweep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 0 plans"));
}

#[test]
fn test_cli_invalid_duration_is_rejected() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    cadence_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "plan",
            "create",
            "Too long",
            "--duration",
            "500",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration_minutes"));
}
