//! Builders for running the `addon` binary in isolation.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment cannot leak in.
pub const ADDON_ENV: &[&str] = &[
    "REDIS_URL",
    "CELLAR_ADDON_HOST",
    "CELLAR_ADDON_KEY_ID",
    "CELLAR_ADDON_KEY_SECRET",
    "CELLAR_ADDON_REGION",
    "MYSQL_ADDON_URI",
    "POSTGRESQL_ADDON_URI",
    "RUST_LOG",
];

/// An `addon` command running in an empty home and working directory.
///
/// Keep the returned `TempDir` alive for as long as the command runs.
pub fn addon() -> (Command, TempDir) {
    let home = tempfile::tempdir().expect("create temp home");
    let mut cmd = cargo_bin_cmd!("addon");
    cmd.current_dir(home.path()).env("HOME", home.path());
    for key in ADDON_ENV {
        cmd.env_remove(key);
    }
    (cmd, home)
}
