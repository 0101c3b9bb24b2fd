//! Common test utilities for appup integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Build an `appup` command isolated from the host environment.
///
/// Points `APPUP_CONFIG` into the given directory so tests never touch the
/// real `~/.appup`, and disables progress output.
pub fn appup_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("appup").expect("appup binary");
    cmd.env("APPUP_CONFIG", temp.path().join("config.toml"));
    cmd.env("APPUP_NO_PROGRESS", "1");
    cmd
}

/// Write a config file pointing the working directory into `temp`.
pub fn write_config(temp: &TempDir, extra: &str) -> std::path::PathBuf {
    let path = temp.path().join("config.toml");
    let work_dir = temp.path().join("bin");
    let content = format!(
        "work_dir = {:?}\n{extra}",
        work_dir.to_str().expect("utf-8 temp path")
    );
    std::fs::write(&path, content).expect("write config");
    path
}

/// Read a file to a string, returning `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
