#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

const CTRVEIL: &str = env!("CARGO_BIN_EXE_ctrveil");
const TMP_DIR: &str = env!("CARGO_TARGET_TMPDIR");

#[derive(Debug)]
pub struct Output {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Writes `contents` to a fresh scratch file under the test binary's
/// tmpdir and returns its path.
pub fn write_test_file(file_name: &str, contents: &[u8]) -> PathBuf {
    let path = Path::new(TMP_DIR).join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn run(args: &[&str]) -> Output {
    let output = Command::new(CTRVEIL).args(args).output().unwrap();

    Output {
        exit_code: output.status.code().unwrap(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
