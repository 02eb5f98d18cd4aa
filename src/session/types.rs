use crate::auth::AuthState;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default desktop user agent sent by every context.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Launch-time switches for the browser process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchOptions {
    pub headless: bool,
    pub user_agent: String,
    pub chrome_executable: Option<PathBuf>,
    pub extra_args: Vec<String>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub launch: LaunchOptions,
    pub navigation_timeout: Duration,
    pub login_timeout: Duration,
    pub content_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            launch: LaunchOptions::default(),
            navigation_timeout: Duration::from_secs(30),
            login_timeout: Duration::from_secs(10),
            content_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// One-shot look at the first node matching a selector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub found: bool,
    pub visible: bool,
    pub text: String,
}

/// Starts the browser process.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, opts: &LaunchOptions) -> Result<Arc<dyn BrowserHandle>>;
}

/// A running browser process.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// Fresh isolated context with one page, seeded from `auth`.
    async fn new_context(&self, auth: &AuthState) -> Result<Box<dyn RequestPage>>;
}

/// The single page of a request-scoped context.
#[async_trait]
pub trait RequestPage: Send + Sync {
    /// Start navigation and return once the document is committed.
    async fn goto(&self, url: &str) -> Result<()>;
    /// True once the document has left the `loading` state
    /// (DOMContentLoaded has fired).
    async fn dom_ready(&self) -> Result<bool>;
    async fn probe(&self, selector: &str) -> Result<Probe>;
    async fn html(&self) -> Result<String>;
    /// Close the page and dispose its context. Never fails.
    async fn close(self: Box<Self>);
}
