//! Operation facade
//!
//! Validates, acquires a logged-in page, extracts, and always releases the
//! page. Every outcome comes back as a [`QueryResult`]; nothing here returns
//! `Err` to the caller.


use crate::auth::CredentialStore;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{extract_detail, extract_ranking};
use crate::log::ActivityLogger;
use crate::query::{build_rank_url, build_shop_url, RankQuery};
use crate::selectors::{DETAIL_READY, RANK_CONTAINER};
use crate::session::{AuthenticatedPage, SessionManager};
use crate::taxonomy::Taxonomy;
use crate::types::{DetailResponse, QueryResult, RankResponse, SessionCheck};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct Scout {
    base_url: String,
    home_url: String,
    taxonomy: Arc<Taxonomy>,
    sessions: SessionManager,
    logger: Option<ActivityLogger>,
}

impl Scout {
    pub fn new(
        base_url: impl Into<String>,
        home_url: impl Into<String>,
        taxonomy: Arc<Taxonomy>,
        sessions: SessionManager,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            home_url: home_url.into(),
            taxonomy,
            sessions,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: ActivityLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Load the taxonomy files and wire a Chromium-backed session manager.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let taxonomy = Taxonomy::load(&cfg.menu_file, &cfg.region_file)?;
        let sessions = SessionManager::chrome(
            CredentialStore::new(&cfg.auth_file),
            cfg.session_options(),
        );
        let mut scout = Self::new(&cfg.base_url, cfg.home_url(), Arc::new(taxonomy), sessions);
        if let Some(path) = &cfg.activity_log {
            match ActivityLogger::new(path) {
                Ok(logger) => scout = scout.with_logger(logger),
                Err(e) => warn!(path = %path.display(), error = %e, "activity log disabled"),
            }
        }
        Ok(scout)
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /* ------------ category rank ------------ */

    pub async fn category_rank_async(&self, query: &RankQuery) -> QueryResult<RankResponse> {
        let started = Instant::now();
        let subject = format!("{}/{}", query.city, query.category);
        let res = self.rank(query).await;
        self.record(&subject, "category_rank", started, &res);
        QueryResult::from_result(res)
    }

    pub fn category_rank(&self, query: &RankQuery) -> QueryResult<RankResponse> {
        crate::runtime::block_on(self.category_rank_async(query))
    }

    async fn rank(&self, query: &RankQuery) -> Result<RankResponse> {
        let target = build_rank_url(&self.base_url, &self.taxonomy, query)?;
        let page = self.sessions.open_authenticated_page(&target.url).await?;
        let html = read_when_ready(&page, RANK_CONTAINER).await;
        page.close().await;

        let result = extract_ranking(&html?, &self.base_url);
        info!(url = %target.url, shops = result.len(), "ranking extracted");
        Ok(RankResponse {
            city: query.city.clone(),
            category: query.category.clone(),
            region: query.region.clone(),
            sort: target.sort_label,
            url: target.url,
            result,
        })
    }

    /* ------------ shop detail ------------ */

    pub async fn shop_detail_async(&self, shop_id: &str) -> QueryResult<DetailResponse> {
        let started = Instant::now();
        let res = self.detail(shop_id).await;
        self.record(shop_id, "shop_detail", started, &res);
        QueryResult::from_result(res)
    }

    pub fn shop_detail(&self, shop_id: &str) -> QueryResult<DetailResponse> {
        crate::runtime::block_on(self.shop_detail_async(shop_id))
    }

    async fn detail(&self, shop_id: &str) -> Result<DetailResponse> {
        let url = build_shop_url(&self.base_url, shop_id)?;
        let page = self.sessions.open_authenticated_page(&url).await?;
        let html = read_when_ready(&page, DETAIL_READY).await;
        page.close().await;

        let detail = extract_detail(&html?, shop_id.trim());
        info!(url = %url, name = %detail.name, "detail extracted");
        Ok(DetailResponse { url, detail })
    }

    /* ------------ login check ------------ */

    pub async fn check_async(&self) -> QueryResult<SessionCheck> {
        let started = Instant::now();
        let res = self
            .sessions
            .verify(&self.home_url)
            .await
            .map(|username| SessionCheck {
                username,
                url: self.home_url.clone(),
            });
        self.record("session", "check", started, &res);
        QueryResult::from_result(res)
    }

    pub fn check(&self) -> QueryResult<SessionCheck> {
        crate::runtime::block_on(self.check_async())
    }

    // Logging failures never affect the operation. Rejected input is not an
    // operational failure and is logged at info level.
    fn record<T>(&self, subject: &str, event: &str, started: Instant, res: &Result<T>) {
        let ms = started.elapsed().as_millis();
        match res {
            Err(e) if e.is_validation() => info!(event, subject, error = %e, "query rejected"),
            Err(e) => warn!(event, subject, error = %e, "operation failed"),
            Ok(_) => {}
        }
        let Some(logger) = &self.logger else {
            return;
        };
        let _ = match res {
            Ok(_) => logger.info(Some(subject), event, Some(&format!("succeeded in {ms}ms"))),
            Err(e) if e.is_validation() => {
                logger.info(Some(subject), event, Some(&format!("rejected in {ms}ms: {e}")))
            }
            Err(e) => logger.error(Some(subject), event, Some(&format!("failed in {ms}ms: {e}"))),
        };
    }
}

async fn read_when_ready(page: &AuthenticatedPage, selector: &str) -> Result<String> {
    page.wait_for(selector).await?;
    page.html().await
}
