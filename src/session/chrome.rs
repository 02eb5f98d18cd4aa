//! Chromium backend over the DevTools protocol.

use super::types::*;
use crate::auth::{AuthState, StoredCookie};
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, CookieSameSite, SetCookiesParams, TimeSinceEpoch,
};
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, NavigateParams,
};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Hides `navigator.webdriver` from page scripts.
const MASK_AUTOMATION_FLAG: &str = "--disable-blink-features=AutomationControlled";

pub struct ChromeLauncher;

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, opts: &LaunchOptions) -> Result<Arc<dyn BrowserHandle>> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg(MASK_AUTOMATION_FLAG)
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", opts.user_agent));
        if !opts.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &opts.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        for arg in &opts.extra_args {
            builder = builder.arg(arg.as_str());
        }

        let config = builder
            .build()
            .map_err(|e| ScoutError::Launch(format!("browser config error: {e}")))?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScoutError::Launch(e.to_string()))?;

        let pump = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!(error = %e, "browser handler event error");
                }
            }
            debug!("browser handler stopped");
        });

        info!(headless = opts.headless, "browser launched");
        Ok(Arc::new(ChromeBrowser {
            browser: Arc::new(browser),
            user_agent: opts.user_agent.clone(),
            _pump: pump,
        }))
    }
}

struct ChromeBrowser {
    browser: Arc<Browser>,
    user_agent: String,
    _pump: JoinHandle<()>,
}

impl ChromeBrowser {
    async fn open_seeded(&self, context_id: &BrowserContextId, auth: &AuthState) -> Result<Page> {
        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(ScoutError::Browser)?;
        let page = self.browser.new_page(target).await?;

        page.execute(SetUserAgentOverrideParams::new(self.user_agent.clone()))
            .await?;

        let cookies: Vec<CookieParam> = auth.cookies.iter().filter_map(cookie_param).collect();
        if !cookies.is_empty() {
            page.execute(SetCookiesParams::new(cookies)).await?;
        }
        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
            auth.storage_script(),
        ))
        .await?;
        Ok(page)
    }
}

#[async_trait]
impl BrowserHandle for ChromeBrowser {
    async fn new_context(&self, auth: &AuthState) -> Result<Box<dyn RequestPage>> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| ScoutError::Launch(format!("cannot create browser context: {e}")))?
            .result
            .browser_context_id;
        debug!(context = ?context_id, "browser context created");

        let mut page = ChromePage {
            browser: Arc::clone(&self.browser),
            context_id,
            page: None,
            disposed: false,
        };
        match self.open_seeded(&page.context_id, auth).await {
            Ok(p) => {
                page.page = Some(p);
                Ok(Box::new(page))
            }
            Err(e) => {
                Box::new(page).close().await;
                Err(e)
            }
        }
    }
}

fn cookie_param(c: &StoredCookie) -> Option<CookieParam> {
    if c.domain.is_empty() {
        warn!(cookie = %c.name, "skipping cookie without domain");
        return None;
    }
    let mut builder = CookieParam::builder()
        .name(c.name.clone())
        .value(c.value.clone())
        .domain(c.domain.clone())
        .path(c.path.clone())
        .secure(c.secure)
        .http_only(c.http_only);
    if c.expires > 0.0 {
        builder = builder.expires(TimeSinceEpoch::new(c.expires));
    }
    if let Some(same_site) = c.same_site.as_deref().and_then(parse_same_site) {
        builder = builder.same_site(same_site);
    }
    match builder.build() {
        Ok(param) => Some(param),
        Err(e) => {
            warn!(cookie = %c.name, error = %e, "skipping malformed cookie");
            None
        }
    }
}

fn parse_same_site(raw: &str) -> Option<CookieSameSite> {
    match raw.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" => Some(CookieSameSite::None),
        _ => None,
    }
}

const DOM_READY_SCRIPT: &str = r#"document.readyState !== "loading""#;

/// Serialized `Probe` for the first node matching `selector`.
fn probe_script(selector: &str) -> Result<String> {
    let literal = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
  const el = document.querySelector({literal});
  if (!el) return JSON.stringify({{ found: false, visible: false, text: "" }});
  const rect = el.getBoundingClientRect();
  const style = window.getComputedStyle(el);
  const visible = rect.width > 0 && rect.height > 0
    && style.visibility !== "hidden" && style.display !== "none";
  return JSON.stringify({{ found: true, visible, text: (el.innerText || el.textContent || "").trim() }});
}})()"#
    ))
}

struct ChromePage {
    browser: Arc<Browser>,
    context_id: BrowserContextId,
    page: Option<Page>,
    disposed: bool,
}

impl ChromePage {
    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| ScoutError::Browser("page already closed".into()))
    }
}

#[async_trait]
impl RequestPage for ChromePage {
    async fn goto(&self, url: &str) -> Result<()> {
        let nav = self.page()?.execute(NavigateParams::new(url)).await?;
        if let Some(err) = nav.result.error_text {
            return Err(ScoutError::Browser(format!("navigation to {url} failed: {err}")));
        }
        Ok(())
    }

    async fn dom_ready(&self) -> Result<bool> {
        let page = self.page()?;
        Ok(page.evaluate(DOM_READY_SCRIPT).await?.into_value()?)
    }

    async fn probe(&self, selector: &str) -> Result<Probe> {
        let page = self.page()?;
        let raw: String = page.evaluate(probe_script(selector)?).await?.into_value()?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn html(&self) -> Result<String> {
        Ok(self.page()?.content().await?)
    }

    async fn close(self: Box<Self>) {
        let mut this = self;
        if let Some(page) = this.page.take() {
            if let Err(e) = page.close().await {
                debug!(error = %e, "page close error");
            }
        }
        let params = DisposeBrowserContextParams::new(this.context_id.clone());
        if let Err(e) = this.browser.execute(params).await {
            warn!(context = ?this.context_id, error = %e, "context dispose error");
        }
        this.disposed = true;
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }
        // Last resort for handles dropped without `close()`.
        let browser = Arc::clone(&self.browser);
        let context_id = self.context_id.clone();
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = browser
                    .execute(DisposeBrowserContextParams::new(context_id))
                    .await;
            });
        }
    }
}
