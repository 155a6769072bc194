use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use rentbook::{cli::SCRIPT_ENV_VAR, rentbook_config::HOME_ENV_VAR};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// The CLI binary in script mode with an isolated configuration home.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rentbook_cli").expect("binary built");
    cmd.env(SCRIPT_ENV_VAR, "1").env(HOME_ENV_VAR, home);
    cmd
}
