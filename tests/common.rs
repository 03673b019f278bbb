//! Shared test helpers.

use assert_cmd::Command;
use tempfile::TempDir;

/// Create a temp directory for use as HOSTMAN_HOME and managed-file parent.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostman_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Command for the hostman binary with ambient overrides scrubbed,
/// so tests control exactly which files the run touches.
pub fn hostman_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hostman").expect("hostman binary");
    cmd.env_remove("HOSTMAN_HOME");
    cmd.env_remove("HOSTMAN_SSH_CONFIG");
    cmd.env_remove("HOSTMAN_ALIAS_FILE");
    cmd
}

/// Run a closure with the given env var set, restoring the prior value after.
pub fn with_env_var<F, R>(key: &str, value: &std::ffi::OsStr, f: F) -> R
where
    F: FnOnce() -> R,
{
    let prev = std::env::var_os(key);
    std::env::set_var(key, value);
    let r = f();
    match prev {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
    r
}
