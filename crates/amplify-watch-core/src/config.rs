use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// WatchConfig
// ---------------------------------------------------------------------------

/// Process-wide settings for one watch. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    pub app_id: String,
    pub branch: String,
    pub region: String,
    pub poll_interval: Duration,
    pub site_url: Option<String>,
    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,
    /// Overrides the regional Amplify endpoint.
    pub endpoint: Option<String>,
    /// `None` retries transient failures forever.
    pub max_consecutive_errors: Option<u32>,
}

impl WatchConfig {
    /// Merge explicit settings over an optional config file over defaults.
    pub fn resolve(file: Option<FileConfig>, overrides: ConfigOverrides) -> Result<Self> {
        let file = file.unwrap_or_default();

        let app_id = overrides
            .app_id
            .or(file.app_id)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                WatchError::InvalidConfig(
                    "app id is required (--app-id, AMPLIFY_APP_ID or config file)".to_string(),
                )
            })?;

        let branch = overrides
            .branch
            .or(file.branch)
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        if branch.trim().is_empty() {
            return Err(WatchError::InvalidConfig(
                "branch name must not be empty".to_string(),
            ));
        }

        let region = overrides
            .region
            .or(file.region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let interval_secs = overrides
            .poll_interval_secs
            .or(file.poll_interval_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(WatchError::InvalidConfig(
                "poll interval must be at least 1 second".to_string(),
            ));
        }

        let max_consecutive_errors = overrides
            .max_consecutive_errors
            .or(file.max_consecutive_errors);
        if max_consecutive_errors == Some(0) {
            return Err(WatchError::InvalidConfig(
                "max consecutive errors must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            app_id,
            branch,
            region,
            poll_interval: Duration::from_secs(interval_secs),
            site_url: overrides.site_url.or(file.site_url),
            profile: overrides.profile.or(file.profile),
            endpoint: overrides.endpoint.or(file.endpoint),
            max_consecutive_errors,
        })
    }

    /// Explicit endpoint without a trailing slash, if one was configured.
    pub fn endpoint_override(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }
}

// ---------------------------------------------------------------------------
// ConfigOverrides
// ---------------------------------------------------------------------------

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub app_id: Option<String>,
    pub branch: Option<String>,
    pub region: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub site_url: Option<String>,
    pub profile: Option<String>,
    pub endpoint: Option<String>,
    pub max_consecutive_errors: Option<u32>,
}

// ---------------------------------------------------------------------------
// FileConfig
// ---------------------------------------------------------------------------

/// Optional YAML config file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub app_id: Option<String>,
    pub branch: Option<String>,
    pub region: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub site_url: Option<String>,
    pub profile: Option<String>,
    pub endpoint: Option<String>,
    pub max_consecutive_errors: Option<u32>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: FileConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }
}
