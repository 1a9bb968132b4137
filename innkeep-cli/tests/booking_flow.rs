//! End-to-end booking flow tests for the CLI.
//!
//! These tests drive the binary the way a front desk would: seed the
//! catalog, book stays, exercise the conflict and validation errors, and
//! administer reservation statuses.

mod common;

use common::TestEnv;
use predicates::prelude::*;

/// The full happy path: catalog setup, a confirmed booking, and the
/// worked admission scenario (touching boundary admitted, overlap
/// rejected).
#[test]
fn test_booking_scenario() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    let code = env.reserve(&catalog, "2024-06-01", "2024-06-05", "confirmed");
    assert_eq!(code.len(), 20);
    assert!(code.chars().all(|c| c.is_ascii_hexdigit()));

    // Touching boundary books fine.
    let touching = env.reserve(&catalog, "2024-06-05", "2024-06-08", "confirmed");
    assert_ne!(code, touching);

    // Overlap is rejected with the booking-failure exit code.
    env.command()
        .args([
            "reserve",
            "--room",
            &catalog.room,
            "--customer",
            &catalog.customer,
            "--check-in",
            "2024-06-04",
            "--check-out",
            "2024-06-06",
            "--status",
            "confirmed",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn test_invalid_date_range_rejected() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    env.command()
        .args([
            "reserve",
            "--room",
            &catalog.room,
            "--customer",
            &catalog.customer,
            "--check-in",
            "2024-06-10",
            "--check-out",
            "2024-06-09",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid date range"));
}

#[test]
fn test_unknown_room_rejected() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    env.command()
        .args([
            "reserve",
            "--room",
            "999",
            "--customer",
            &catalog.customer,
            "--check-in",
            "2024-06-01",
            "--check-out",
            "2024-06-05",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("room not found"));
}

#[test]
fn test_pending_confirm_cancel_cycle() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    let code = env.reserve(&catalog, "2024-06-01", "2024-06-05", "pending");

    env.command()
        .args(["show", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending"));

    env.command()
        .args(["confirm", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed"));

    // Confirming again is a no-op, not an error.
    env.command().args(["confirm", &code]).assert().success();

    env.command()
        .args(["cancel", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    // Cancelled is terminal.
    env.command()
        .args(["cancel", &code])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("booking status"));
}

#[test]
fn test_confirm_respects_admission() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    let pending = env.reserve(&catalog, "2024-06-01", "2024-06-05", "pending");
    // A rival confirmed booking lands on overlapping nights first.
    env.reserve(&catalog, "2024-06-03", "2024-06-07", "confirmed");

    env.command()
        .args(["confirm", &pending])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn test_show_missing_code() {
    let env = TestEnv::new();

    env.command()
        .args(["show", "00000000000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_list_filters_and_json() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();

    env.reserve(&catalog, "2024-06-01", "2024-06-05", "confirmed");
    env.reserve(&catalog, "2024-06-05", "2024-06-08", "pending");

    let listing = env.stdout(&["list", "--room", &catalog.room]);
    assert_eq!(listing.lines().count(), 2);
    assert!(listing.contains("Confirmed"));
    assert!(listing.contains("Pending"));

    let raw = env.stdout(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);

    let none = env.stdout(&["list", "--customer", "999"]);
    assert!(none.is_empty());
}

#[test]
fn test_show_json_output() {
    let env = TestEnv::new();
    let catalog = env.setup_catalog();
    let code = env.reserve(&catalog, "2024-06-01", "2024-06-05", "confirmed");

    let raw = env.stdout(&["show", &code, "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["code"], serde_json::Value::String(code));
    assert_eq!(parsed["status"], "Confirmed");
}

#[test]
fn test_duplicate_customer_email_rejected() {
    let env = TestEnv::new();
    env.setup_catalog();

    env.command()
        .args([
            "add-customer",
            "--name",
            "Ada Again",
            "--email",
            "ada@example.com",
        ])
        .assert()
        .failure();
}
