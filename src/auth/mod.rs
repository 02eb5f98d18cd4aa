//! Persisted login state (`auth.json`)
//!
//! The bundle is produced by an interactive login elsewhere; here it is only
//! read, checked for usability, and replayed into fresh browser contexts.


use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// One cookie as captured by the login flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Unix seconds; `-1` marks a session cookie.
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub same_site: Option<String>,
}

fn default_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub name: String,
    pub value: String,
}

/// Local storage captured for a single origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrigin {
    pub origin: String,
    #[serde(default)]
    pub local_storage: Vec<StorageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    #[serde(default)]
    pub cookies: Vec<StoredCookie>,
    #[serde(default)]
    pub origins: Vec<StoredOrigin>,
}

impl AuthState {
    /// Needs at least one cookie and one origin to be worth replaying.
    pub fn is_usable(&self) -> bool {
        !self.cookies.is_empty() && !self.origins.is_empty()
    }

    /// Script that replays captured local storage when the page's origin
    /// matches one of the stored origins.
    pub fn storage_script(&self) -> String {
        let data: serde_json::Map<String, serde_json::Value> = self
            .origins
            .iter()
            .map(|o| {
                let entries = o
                    .local_storage
                    .iter()
                    .map(|e| (e.name.clone(), serde_json::Value::String(e.value.clone())))
                    .collect::<serde_json::Map<_, _>>();
                (o.origin.clone(), serde_json::Value::Object(entries))
            })
            .collect();
        format!(
            "(() => {{ const stored = {}; const entries = stored[window.location.origin]; \
             if (!entries) return; try {{ for (const [k, v] of Object.entries(entries)) \
             {{ window.localStorage.setItem(k, v); }} }} catch (e) {{}} }})();",
            serde_json::Value::Object(data)
        )
    }
}

/// File-backed credential bundle.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and check the bundle. Every way of being unusable collapses to
    /// [`ScoutError::MissingAuth`]; the reason only goes to the log.
    pub fn load(&self) -> Result<AuthState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "auth state not readable");
                return Err(ScoutError::MissingAuth);
            }
        };
        if raw.trim().is_empty() {
            warn!(path = %self.path.display(), "auth state file is empty");
            return Err(ScoutError::MissingAuth);
        }
        let state: AuthState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "auth state is not valid JSON");
                return Err(ScoutError::MissingAuth);
            }
        };
        if !state.is_usable() {
            warn!(
                path = %self.path.display(),
                cookies = state.cookies.len(),
                origins = state.origins.len(),
                "auth state has no cookies or no origins"
            );
            return Err(ScoutError::MissingAuth);
        }
        Ok(state)
    }
}
