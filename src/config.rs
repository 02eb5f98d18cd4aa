//! Runtime configuration
//!
//! JSON on disk; every field has a default so a partial file is fine.

use crate::error::{Result, ScoutError};
use crate::session::{LaunchOptions, SessionOptions, DEFAULT_USER_AGENT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.dianping.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root, without trailing slash.
    pub base_url: String,
    /// Page used by the startup login check.
    pub home_path: String,
    pub auth_file: PathBuf,
    pub menu_file: PathBuf,
    pub region_file: PathBuf,
    pub headless: bool,
    pub user_agent: String,
    pub chrome_executable: Option<PathBuf>,
    pub navigation_timeout_ms: u64,
    pub login_timeout_ms: u64,
    pub content_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// `None` disables the activity log.
    pub activity_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            home_path: "/beijing".to_string(),
            auth_file: PathBuf::from("auth.json"),
            menu_file: PathBuf::from("data/dianping-menu.txt"),
            region_file: PathBuf::from("data/dianping-region.txt"),
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            navigation_timeout_ms: 30_000,
            login_timeout_ms: 10_000,
            content_timeout_ms: 10_000,
            poll_interval_ms: 250,
            activity_log: default_activity_log(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "dianping-scout", "dianping-scout")
}

fn default_activity_log() -> Option<PathBuf> {
    project_dirs().map(|p| p.data_local_dir().join("activity.log"))
}

impl Config {
    /// Explicit file if given, else `<config dir>/config.json` if present,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match project_dirs().map(|d| d.config_dir().join("config.json")) {
                Some(p) if p.is_file() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ScoutError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| ScoutError::Config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn home_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.home_path)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            launch: LaunchOptions {
                headless: self.headless,
                user_agent: self.user_agent.clone(),
                chrome_executable: self.chrome_executable.clone(),
                extra_args: Vec::new(),
            },
            navigation_timeout: Duration::from_millis(self.navigation_timeout_ms),
            login_timeout: Duration::from_millis(self.login_timeout_ms),
            content_timeout: Duration::from_millis(self.content_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
