use std::path::Path;

use serde::{Serialize, Serializer};

use crate::{args::ConfigArgs, profile::Profile};

pub const DEFAULT_SYNC_URL: &str = "https://api.todoist.com/api/v1/sync";
pub const TOKEN_ENV: &str = "TODOIST_API_TOKEN";

#[derive(Debug, Serialize)]
pub struct AppConfig {
    pub profile_path: String,
    pub profile_exists: bool,
    #[serde(serialize_with = "redact")]
    pub api_token: Option<String>,
    pub output_dir: String,
    pub sync_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profile_path: "./".to_string(),
            profile_exists: false,
            api_token: None,
            output_dir: ".".to_string(),
            sync_url: DEFAULT_SYNC_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_args(args: ConfigArgs, profile_path: &Path, profile: Option<&Profile>) -> Self {
        let defaults = AppConfig::default();

        let api_token = args
            .token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| profile.and_then(|p| p.api_token.clone()));

        let output_dir = profile
            .and_then(|p| p.output_dir.clone())
            .unwrap_or(defaults.output_dir);

        let sync_url = profile
            .and_then(|p| p.sync_url.clone())
            .unwrap_or(defaults.sync_url);

        AppConfig {
            profile_exists: profile.is_some(),
            profile_path: profile_path
                .to_str()
                .map(|p| p.to_string())
                .unwrap_or(defaults.profile_path),
            api_token,
            output_dir,
            sync_url,
        }
    }

    pub fn require_token(&self) -> anyhow::Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No API token configured. Set {} (environment or .env), pass --token, or add api_token to {}",
                TOKEN_ENV,
                self.profile_path
            )
        })
    }
}

fn redact<S: Serializer>(token: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match token {
        Some(_) => serializer.serialize_str("********"),
        None => serializer.serialize_none(),
    }
}
