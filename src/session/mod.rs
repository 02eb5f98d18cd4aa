//! Browser session lifecycle
//!
//! One browser process per [`SessionManager`], launched on first use. Every
//! request gets its own context seeded from the credential bundle and is
//! verified as logged in before it is handed out.

mod chrome;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use chrome::ChromeLauncher;
pub use types::*;

use crate::auth::CredentialStore;
use crate::error::{Result, ScoutError};
use crate::selectors::LOGIN_USERNAME;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub struct SessionManager {
    launcher: Arc<dyn BrowserLauncher>,
    credentials: CredentialStore,
    options: SessionOptions,
    browser: OnceCell<Arc<dyn BrowserHandle>>,
}

impl SessionManager {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        credentials: CredentialStore,
        options: SessionOptions,
    ) -> Self {
        Self {
            launcher,
            credentials,
            options,
            browser: OnceCell::new(),
        }
    }

    /// Manager backed by a local Chromium.
    pub fn chrome(credentials: CredentialStore, options: SessionOptions) -> Self {
        Self::new(Arc::new(ChromeLauncher), credentials, options)
    }

    /// The shared browser, launched on first call.
    ///
    /// Concurrent first calls launch once. A failed launch leaves nothing
    /// cached, so the next call tries again.
    pub async fn acquire_session(&self) -> Result<Arc<dyn BrowserHandle>> {
        self.browser
            .get_or_try_init(|| async {
                info!("launching browser");
                self.launcher
                    .launch(&self.options.launch)
                    .await
                    .map_err(|e| match e {
                        ScoutError::Launch(_) => e,
                        other => ScoutError::Launch(other.to_string()),
                    })
            })
            .await
            .cloned()
    }

    /// Open `url` in a fresh context and confirm the visitor is logged in.
    ///
    /// The returned page belongs to the caller, who must [`close`] it. On any
    /// failure after the context exists, it is closed here.
    ///
    /// [`close`]: AuthenticatedPage::close
    pub async fn open_authenticated_page(&self, url: &str) -> Result<AuthenticatedPage> {
        let auth = self.credentials.load()?;
        let browser = self.acquire_session().await?;
        let page = browser.new_context(&auth).await?;

        if let Err(e) = navigate(
            page.as_ref(),
            url,
            self.options.navigation_timeout,
            self.options.poll_interval,
        )
        .await
        {
            warn!(url, error = %e, "navigation failed");
            page.close().await;
            return Err(ScoutError::NotLoggedIn);
        }

        let probe = wait_for_visible(
            page.as_ref(),
            LOGIN_USERNAME,
            self.options.login_timeout,
            self.options.poll_interval,
        )
        .await;
        let username = probe.map(|p| p.text.trim().to_string()).unwrap_or_default();
        if username.is_empty() {
            warn!(url, "login verification failed");
            page.close().await;
            return Err(ScoutError::NotLoggedIn);
        }

        debug!(url, user = %username, "login verified");
        Ok(AuthenticatedPage {
            page,
            username,
            content_timeout: self.options.content_timeout,
            poll_interval: self.options.poll_interval,
        })
    }

    /// Open `url`, confirm login, release the page, and return the username.
    pub async fn verify(&self, url: &str) -> Result<String> {
        let page = self.open_authenticated_page(url).await?;
        let username = page.username().to_string();
        page.close().await;
        Ok(username)
    }
}

/// A logged-in page owned by one request.
pub struct AuthenticatedPage {
    page: Box<dyn RequestPage>,
    username: String,
    content_timeout: Duration,
    poll_interval: Duration,
}

impl AuthenticatedPage {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Wait for `selector` to become visible, or fail with
    /// [`ScoutError::PageLoad`].
    pub async fn wait_for(&self, selector: &str) -> Result<()> {
        match wait_for_visible(
            self.page.as_ref(),
            selector,
            self.content_timeout,
            self.poll_interval,
        )
        .await
        {
            Some(_) => Ok(()),
            None => {
                warn!(selector, "content never appeared");
                Err(ScoutError::PageLoad)
            }
        }
    }

    pub async fn html(&self) -> Result<String> {
        self.page.html().await
    }

    pub async fn close(self) {
        self.page.close().await;
    }
}

/// Navigate and wait until DOMContentLoaded has fired, all within `timeout`.
/// Selectors and snapshots are only trusted after this returns.
async fn navigate(
    page: &dyn RequestPage,
    url: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<()> {
    tokio::time::timeout(timeout, load(page, url, poll))
        .await
        .map_err(|_| ScoutError::Browser(format!("navigation to {url} timed out")))?
}

async fn load(page: &dyn RequestPage, url: &str, poll: Duration) -> Result<()> {
    page.goto(url).await?;
    loop {
        match page.dom_ready().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => debug!(url, error = %e, "readiness check failed, retrying"),
        }
        tokio::time::sleep(poll).await;
    }
}

/// Poll until the first match of `selector` is visible, up to `timeout`.
pub(crate) async fn wait_for_visible(
    page: &dyn RequestPage,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Option<Probe> {
    let polling = async {
        loop {
            match page.probe(selector).await {
                Ok(probe) if probe.visible => return probe,
                Ok(_) => {}
                Err(e) => debug!(selector, error = %e, "probe failed, retrying"),
            }
            tokio::time::sleep(poll).await;
        }
    };
    tokio::time::timeout(timeout, polling).await.ok()
}
