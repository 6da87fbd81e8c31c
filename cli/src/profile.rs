use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_PROFILE_FILENAME: &str = "profile.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Profile {
    pub api_token: Option<String>,
    pub output_dir: Option<String>,
    pub sync_url: Option<String>,
}

impl Profile {
    pub fn from_path(profile: &Path) -> anyhow::Result<Option<Self>> {
        if !profile.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(profile).context("Failed to read profile file")?;

        let profile: Self = toml::from_str(&contents).context("Failed to deserialize profile")?;

        Ok(Some(profile))
    }
}

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
fn get_config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        // XDG_CONFIG_HOME is the base directory, add "tasktree" subdirectory
        PathBuf::from(xdg_config).join("tasktree")
    } else {
        directories::ProjectDirs::from("com", "tasktree", "tasktree")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn get_profile_path(arg_profile: &Option<String>) -> PathBuf {
    match arg_profile {
        Some(path) => PathBuf::from(path),
        None => get_config_dir().join(DEFAULT_PROFILE_FILENAME),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_profile_is_none() {
        let dir = TempDir::new().unwrap();

        let profile = Profile::from_path(&dir.path().join("nope.toml")).unwrap();

        assert!(profile.is_none());
    }

    #[test]
    fn test_load_profile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(&path, "api_token = \"secret\"\noutput_dir = \"/tmp/exports\"\n").unwrap();

        let loaded = Profile::from_path(&path).unwrap().unwrap();

        assert_eq!(
            loaded,
            Profile {
                api_token: Some("secret".to_string()),
                output_dir: Some("/tmp/exports".to_string()),
                sync_url: None,
            }
        );
    }

    #[test]
    fn test_invalid_profile_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "api_token = [").unwrap();

        assert!(Profile::from_path(&path).is_err());
    }

    #[test]
    fn test_explicit_profile_path_wins() {
        let path = get_profile_path(&Some("/etc/tasktree.toml".to_string()));

        assert_eq!(path, PathBuf::from("/etc/tasktree.toml"));
    }
}
