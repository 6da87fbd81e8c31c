#![allow(clippy::unwrap_used)]
#![allow(deprecated)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory, config home and output directory per test
pub struct TestContext {
    pub temp_dir: TempDir,
    pub output_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("exports");

        Self {
            temp_dir,
            output_dir,
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasktree").unwrap();
        cmd.current_dir(self.temp_dir.path())
            .env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"))
            .env_remove("TODOIST_API_TOKEN")
            .env_remove("TASKTREE_PROFILE")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn fixture_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("snapshot.json")
    }

    /// Write a profile file under the test config home
    pub fn write_profile(&self, contents: &str) -> PathBuf {
        let dir = self.temp_dir.path().join("config").join("tasktree");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Files currently in the output directory
    pub fn exported_files(&self) -> Vec<PathBuf> {
        if !self.output_dir.exists() {
            return vec![];
        }
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.output_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort();
        files
    }
}
