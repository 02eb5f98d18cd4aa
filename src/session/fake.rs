//! In-process browser double serving canned HTML per URL.

use super::types::*;
use crate::auth::AuthState;
use crate::error::{Result, ScoutError};
use crate::extract::Node;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) const AUTH_JSON: &str = r#"{
    "cookies": [{"name": "dper", "value": "abc", "domain": ".dianping.com", "path": "/"}],
    "origins": [{"origin": "https://www.dianping.com", "localStorage": []}]
}"#;

pub(crate) const LOGGED_IN: &str =
    r#"<div class="userinfo-container"><span class="username">食客小王</span></div>"#;

pub(crate) fn auth_file() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(AUTH_JSON.as_bytes()).unwrap();
    f
}

pub(crate) fn fast_options() -> SessionOptions {
    SessionOptions {
        navigation_timeout: Duration::from_millis(200),
        login_timeout: Duration::from_millis(60),
        content_timeout: Duration::from_millis(60),
        poll_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

/// Shared state and counters of the fake browser.
#[derive(Default)]
pub(crate) struct FakeSite {
    routes: Mutex<HashMap<String, String>>,
    streaming: Mutex<HashMap<String, (String, usize)>>,
    pub launch_failures: AtomicUsize,
    launches: AtomicUsize,
    contexts: AtomicUsize,
    closed: AtomicUsize,
    ready_checks: AtomicUsize,
    visited: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: &str, html: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Serve `partial` for `url` until readiness has been checked `checks`
    /// times, then the full routed document.
    pub fn stream(&self, url: &str, partial: &str, checks: usize) -> &Self {
        self.streaming
            .lock()
            .unwrap()
            .insert(url.to_string(), (partial.to_string(), checks));
        self
    }

    pub fn ready_checks(&self) -> usize {
        self.ready_checks.load(Ordering::SeqCst)
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn contexts(&self) -> usize {
        self.contexts.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

pub(crate) fn launcher(site: &Arc<FakeSite>) -> Arc<dyn BrowserLauncher> {
    Arc::new(FakeLauncher(Arc::clone(site)))
}

struct FakeLauncher(Arc<FakeSite>);

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self, _opts: &LaunchOptions) -> Result<Arc<dyn BrowserHandle>> {
        self.0.launches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let failures = &self.0.launch_failures;
        if failures.load(Ordering::SeqCst) > 0 {
            failures.fetch_sub(1, Ordering::SeqCst);
            return Err(ScoutError::Launch("chrome not found".into()));
        }
        Ok(Arc::new(FakeBrowser(Arc::clone(&self.0))))
    }
}

struct FakeBrowser(Arc<FakeSite>);

#[async_trait]
impl BrowserHandle for FakeBrowser {
    async fn new_context(&self, auth: &AuthState) -> Result<Box<dyn RequestPage>> {
        assert!(auth.is_usable());
        self.0.contexts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            site: Arc::clone(&self.0),
            html: Mutex::new(String::new()),
            loading: Mutex::new(None),
        }))
    }
}

struct FakePage {
    site: Arc<FakeSite>,
    html: Mutex<String>,
    /// Full document and readiness checks left while still streaming.
    loading: Mutex<Option<(String, usize)>>,
}

fn probe_html(html: &str, selector: &str) -> Result<Probe> {
    let sel = Selector::parse(selector).map_err(|e| ScoutError::Browser(format!("{e:?}")))?;
    let doc = Html::parse_document(html);
    let probe = doc
        .root_element()
        .find_first(&sel)
        .map(|el| Probe {
            found: true,
            visible: el.value().attr("hidden").is_none(),
            text: el.inner_text(),
        })
        .unwrap_or_default();
    Ok(probe)
}

#[async_trait]
impl RequestPage for FakePage {
    async fn goto(&self, url: &str) -> Result<()> {
        self.site.visited.lock().unwrap().push(url.to_string());
        let html = self
            .site
            .routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ScoutError::Browser(format!("net::ERR_NAME_NOT_RESOLVED {url}")))?;
        match self.site.streaming.lock().unwrap().get(url).cloned() {
            Some((partial, checks)) => {
                *self.html.lock().unwrap() = partial;
                *self.loading.lock().unwrap() = Some((html, checks));
            }
            None => *self.html.lock().unwrap() = html,
        }
        Ok(())
    }

    async fn dom_ready(&self) -> Result<bool> {
        self.site.ready_checks.fetch_add(1, Ordering::SeqCst);
        let mut loading = self.loading.lock().unwrap();
        let Some((full, left)) = loading.as_mut() else {
            return Ok(true);
        };
        if *left > 1 {
            *left -= 1;
            return Ok(false);
        }
        let full = std::mem::take(full);
        *loading = None;
        *self.html.lock().unwrap() = full;
        Ok(true)
    }

    async fn probe(&self, selector: &str) -> Result<Probe> {
        let html = self.html.lock().unwrap().clone();
        probe_html(&html, selector)
    }

    async fn html(&self) -> Result<String> {
        Ok(self.html.lock().unwrap().clone())
    }

    async fn close(self: Box<Self>) {
        self.site.closed.fetch_add(1, Ordering::SeqCst);
    }
}
