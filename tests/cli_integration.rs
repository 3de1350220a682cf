//! Integration tests for sqlcoach CLI commands
//!
//! Library-level tests exercise the storage and lesson layers against
//! temporary databases; binary-level tests run the CLI with HOME pointed
//! at a temp directory so nothing touches the real app home.

use assert_cmd::Command;
use predicates::prelude::*;
use sqlcoach::lessons;
use sqlcoach::storage::{seed, Database, SqlValue};
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Creates a seeded test database in a temporary directory.
/// Returns the Database instance and the temp directory (which must be kept alive).
fn create_test_db() -> (Database, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("sample.db");
    seed::write_sample(&path).expect("Failed to seed test database");
    let db = Database::open(&path).expect("Failed to open test database");
    (db, dir)
}

/// Returns a sqlcoach command with HOME pointed at the given directory.
fn sqlcoach_in(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sqlcoach").expect("binary should build");
    cmd.env("HOME", home.path());
    cmd
}

/// Creates a temp home with a seeded sample database at the default path.
fn seeded_home() -> tempfile::TempDir {
    let home = tempdir().expect("Failed to create temp home");
    sqlcoach_in(&home)
        .args(["fetch", "--seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded sample database"));
    home
}

// =============================================================================
// Query Helper Tests
// =============================================================================

mod query_tests {
    use super::*;

    #[test]
    fn test_limit_query_row_and_column_counts() {
        let (db, _dir) = create_test_db();

        let result = db
            .run_query("SELECT * FROM products LIMIT 5")
            .expect("Failed to run query");

        assert_eq!(result.row_count(), 5, "LIMIT 5 should return exactly 5 rows");
        assert_eq!(
            result.columns,
            seed::PRODUCT_COLUMNS,
            "Columns should match the declared products schema"
        );
    }

    #[test]
    fn test_aggregate_query() {
        let (db, _dir) = create_test_db();

        let result = db
            .run_query("SELECT COUNT(*) AS n FROM customers")
            .expect("Failed to run query");

        assert_eq!(result.columns, vec!["n"]);
        assert_eq!(result.rows[0][0], SqlValue::Integer(8));
    }

    #[test]
    fn test_join_query_against_sample_schema() {
        let (db, _dir) = create_test_db();

        let result = db
            .run_query(
                "SELECT c.name, o.order_date FROM orders o
                 INNER JOIN customers c ON c.id = o.customer_id
                 ORDER BY o.order_date",
            )
            .expect("Failed to run join query");

        assert_eq!(result.row_count(), 10, "One row per order");
        assert_eq!(
            result.rows[0][0],
            SqlValue::Text("Alma Terra".to_string()),
            "Earliest order belongs to Alma Terra"
        );
    }

    #[test]
    fn test_engine_error_is_unmodified() {
        let (db, _dir) = create_test_db();

        let err = db.run_query("SELEC * FROM products").unwrap_err();
        assert!(
            err.to_string().contains("syntax error"),
            "Engine syntax error should pass through, got: {err}"
        );
    }

    #[test]
    fn test_all_lesson_queries_run() {
        let (db, _dir) = create_test_db();

        for lesson in lessons::all() {
            for step in lesson.steps {
                if let Some(sql) = step.sql {
                    db.run_query(sql)
                        .unwrap_or_else(|e| panic!("Lesson query failed: {sql}: {e}"));
                }
            }
        }
    }
}

// =============================================================================
// Fetch Command Tests
// =============================================================================

mod fetch_tests {
    use super::*;

    #[test]
    fn test_fetch_seed_creates_database() {
        let home = seeded_home();
        let db_path = home.path().join(".sqlcoach").join("sample.db");
        assert!(db_path.exists(), "Seeded database should exist at default path");
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .arg("fetch")
            .assert()
            .success()
            .stdout(predicate::str::contains("already present"));
    }

    #[test]
    fn test_failed_forced_download_keeps_existing_database() {
        let home = seeded_home();

        // Point the download at an address nothing listens on.
        sqlcoach_in(&home)
            .args(["config", "set", "database_url", "http://127.0.0.1:1/sample.db"])
            .assert()
            .success();

        sqlcoach_in(&home)
            .args(["fetch", "--force"])
            .assert()
            .failure();

        let db_path = home.path().join(".sqlcoach").join("sample.db");
        assert!(
            db_path.exists(),
            "A failed forced re-download should leave the existing database in place"
        );

        // The old database is still fully usable.
        let db = Database::open(&db_path).expect("Database should still open");
        let result = db
            .run_query("SELECT COUNT(*) FROM products")
            .expect("Failed to query surviving database");
        assert_eq!(result.rows[0][0], SqlValue::Integer(12));
    }

    #[test]
    fn test_fetch_force_reseeds() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["fetch", "--seed", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Seeded sample database"));
    }
}

// =============================================================================
// Query Command Tests
// =============================================================================

mod query_command_tests {
    use super::*;

    #[test]
    fn test_query_text_output_renders_table() {
        let home = seeded_home();

        let assert = sqlcoach_in(&home)
            .args(["query", "SELECT * FROM products LIMIT 5"])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        // Header appears exactly once; five data rows follow it.
        assert_eq!(output.matches("unit_price").count(), 1);
        assert!(output.contains("Earl Grey Tea"));
        assert!(output.contains("5 rows"));
    }

    #[test]
    fn test_query_json_output() {
        let home = seeded_home();

        let assert = sqlcoach_in(&home)
            .args([
                "query",
                "SELECT name FROM products WHERE category = 'Dairy' ORDER BY name",
                "--format",
                "json",
            ])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        let rows = parsed.as_array().expect("JSON array");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "Aged Gouda");
    }

    #[test]
    fn test_query_csv_output() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args([
                "query",
                "SELECT id, name FROM customers ORDER BY id LIMIT 2",
                "--format",
                "csv",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("id,name"))
            .stdout(predicate::str::contains("1,Alma Terra"));
    }

    #[test]
    fn test_query_invalid_sql_fails_with_engine_message() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["query", "SELECT * FROM no_such_table"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no_such_table"));
    }

    #[test]
    fn test_query_without_database_points_at_fetch() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .args(["query", "SELECT 1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("sqlcoach fetch"));
    }
}

// =============================================================================
// Introspection Command Tests
// =============================================================================

mod introspection_tests {
    use super::*;

    #[test]
    fn test_tables_lists_sample_tables() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .arg("tables")
            .assert()
            .success()
            .stdout(predicate::str::contains("customers"))
            .stdout(predicate::str::contains("products"))
            .stdout(predicate::str::contains("orders"))
            .stdout(predicate::str::contains("order_items"));
    }

    #[test]
    fn test_schema_shows_columns_and_constraints() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["schema", "products"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unit_price"))
            .stdout(predicate::str::contains("PRIMARY KEY"));
    }

    #[test]
    fn test_schema_unknown_table_fails() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["schema", "ghosts"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("ghosts"));
    }

    #[test]
    fn test_tables_json_output() {
        let home = seeded_home();

        let assert = sqlcoach_in(&home)
            .args(["tables", "--format", "json"])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }
}

// =============================================================================
// Lesson Command Tests
// =============================================================================

mod lesson_tests {
    use super::*;

    #[test]
    fn test_lessons_lists_all() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .arg("lessons")
            .assert()
            .success()
            .stdout(predicate::str::contains("select-basics"))
            .stdout(predicate::str::contains("where-filtering"))
            .stdout(predicate::str::contains("joins"))
            .stdout(predicate::str::contains("0 of 3 lessons completed"));
    }

    #[test]
    fn test_lesson_runs_and_records_completion() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["lesson", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("SELECT * FROM products LIMIT 5"))
            .stdout(predicate::str::contains("Earl Grey Tea"))
            .stdout(predicate::str::contains("completed"));

        sqlcoach_in(&home)
            .arg("lessons")
            .assert()
            .success()
            .stdout(predicate::str::contains("1 of 3 lessons completed"));
    }

    #[test]
    fn test_lesson_by_slug() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["lesson", "joins"])
            .assert()
            .success()
            .stdout(predicate::str::contains("INNER JOIN"));
    }

    #[test]
    fn test_lesson_no_run_needs_no_database() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .args(["lesson", "2", "--no-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("WHERE"));
    }

    #[test]
    fn test_unknown_lesson_fails() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .args(["lesson", "99"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No lesson '99'"));
    }
}

// =============================================================================
// Status, Doctor, and Config Tests
// =============================================================================

mod overview_tests {
    use super::*;

    #[test]
    fn test_status_without_database() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not fetched yet"));
    }

    #[test]
    fn test_status_with_database() {
        let home = seeded_home();

        sqlcoach_in(&home)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Tables: 4"));
    }

    #[test]
    fn test_doctor_json_reports_checks() {
        let home = seeded_home();

        let assert = sqlcoach_in(&home)
            .args(["doctor", "--format", "json"])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["error_count"], 0);
        assert!(parsed["checks"].as_array().unwrap().len() >= 4);
    }

    #[test]
    fn test_doctor_verifies_lesson_schema() {
        let home = seeded_home();

        let assert = sqlcoach_in(&home)
            .args(["doctor", "--format", "json"])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        let schema_check = parsed["checks"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["name"] == "sample schema")
            .expect("doctor should check the sample schema");
        assert_eq!(schema_check["status"], "ok");
    }

    #[test]
    fn test_csv_rejected_where_unsupported() {
        let home = seeded_home();

        for command in ["tables", "lessons", "doctor"] {
            sqlcoach_in(&home)
                .args([command, "--format", "csv"])
                .assert()
                .failure()
                .stderr(predicate::str::contains("CSV output is not supported"));
        }

        sqlcoach_in(&home)
            .args(["schema", "products", "--format", "csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("CSV output is not supported"));
    }

    #[test]
    fn test_config_set_and_show() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .args(["config", "set", "browser_package", "brave"])
            .assert()
            .success();

        let assert = sqlcoach_in(&home)
            .args(["config", "show"])
            .assert()
            .success();

        let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
        assert_eq!(parsed["browser_package"], "brave");
    }

    #[test]
    fn test_config_set_unknown_key_fails() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .args(["config", "set", "nonsense", "value"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn test_setup_dry_run_prints_plan() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .args(["setup", "--dry-run"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Install browser package"))
            .stdout(predicate::str::contains("Remove the downloaded archive"));
    }

    #[test]
    fn test_help_lists_commands() {
        let home = tempdir().expect("Failed to create temp home");

        sqlcoach_in(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("query"))
            .stdout(predicate::str::contains("lesson"))
            .stdout(predicate::str::contains("setup"));
    }
}
