//! Common test utilities for CLI integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;

/// An isolated data directory plus helpers for driving the binary.
pub struct TestEnv {
    temp: tempfile::TempDir,
    pub data_dir: PathBuf,
}

/// Seeded catalog ids, as printed by the add commands.
pub struct Catalog {
    pub hotel: String,
    pub room: String,
    pub customer: String,
}

impl TestEnv {
    /// Creates an initialized environment.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let data_dir = temp.path().join("data");
        let env = Self { temp, data_dir };
        env.command().arg("init").assert().success();
        env
    }

    /// Builds a command pointed at this environment's data directory.
    ///
    /// `INNKEEP_*` variables are scrubbed so an outer environment cannot
    /// leak into the test.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").unwrap();
        for name in [
            "INNKEEP_DATA_DIR",
            "INNKEEP_BUSY_TIMEOUT",
            "INNKEEP_DISABLE_AUTOINIT",
            "INNKEEP_MAIL_ATTEMPTS",
            "INNKEEP_MAIL_RETRY_DELAY_MS",
        ] {
            cmd.env_remove(name);
        }
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Runs a command and returns its trimmed stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "command {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    /// Seeds one hotel, one room (101), and one customer.
    pub fn setup_catalog(&self) -> Catalog {
        let hotel = self.stdout(&[
            "add-hotel",
            "--name",
            "Seaside Inn",
            "--email",
            "desk@seaside.example",
        ]);
        let room = self.stdout(&["add-room", "--hotel", &hotel, "--number", "101"]);
        let customer = self.stdout(&[
            "add-customer",
            "--name",
            "Ada Brook",
            "--email",
            "ada@example.com",
        ]);
        Catalog {
            hotel,
            room,
            customer,
        }
    }

    /// Books a stay through the CLI and returns the reservation code.
    pub fn reserve(&self, catalog: &Catalog, check_in: &str, check_out: &str, status: &str) -> String {
        self.stdout(&[
            "reserve",
            "--room",
            &catalog.room,
            "--customer",
            &catalog.customer,
            "--check-in",
            check_in,
            "--check-out",
            check_out,
            "--status",
            status,
        ])
    }
}
