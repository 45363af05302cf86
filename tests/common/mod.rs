#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use fit_intake::{config::ConfigManager, storage::JsonProfileStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home for one test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Storage and config manager rooted where the CLI looks for them.
pub fn setup_test_env(home: &Path) -> (JsonProfileStorage, ConfigManager) {
    let storage =
        JsonProfileStorage::new(home.join("profile")).expect("create json profile storage");
    let config_manager = ConfigManager::with_base_dir(home.to_path_buf())
        .expect("create config manager for temp dir");
    (storage, config_manager)
}

/// The CLI binary in script mode, isolated under `home`.
pub fn script_cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fit_intake_cli").expect("binary");
    cmd.env("FIT_INTAKE_CLI_SCRIPT", "1")
        .env("FIT_INTAKE_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

/// Answers every screen of the standard catalog, without the final
/// navigation out of the terminal screen.
pub const ANSWERS_SCRIPT: &str = r#"next
set fullName "Ana Silva"
set "date of birth" 1990-04-12
set weight 62
set height 168
next
select "Job Type" Moderate
select 2 Active
next
next
set trainingExperience 12
next
frequency 3
next
set medications none
next
set diet "Mostly vegetarian"
next
select 1 Never
select "Menstrual cycle" Regular
next
toggle Flexibility
toggle 2
next
"#;

/// Full run with the product preview enabled.
pub fn full_script() -> String {
    format!("{ANSWERS_SCRIPT}next\nnext\n")
}
