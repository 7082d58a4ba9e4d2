//! Audit orchestration
//!
//! This module ties the checks together:
//! - Normalizing the target URL
//! - Fetching homepage, robots.txt and llms.txt concurrently
//! - Serving the homepage from the response cache when enabled
//! - Parsing the homepage once and running every check on it
//! - Scoring, recommendations and extra checks

mod result;

pub use result::AuditResult;

use crate::checks::{
    check_content, check_llms_txt, check_meta, check_schema, AuditCheck, AuditContext,
    SchemaValidationCheck,
};
use crate::config::Config;
use crate::fetch::{FetchResult, FetchedResponse, Fetcher, HttpFetcher};
use crate::robots::{check_robots, BotRoster};
use crate::scoring::{build_recommendations, ScoreBand, ScoreBreakdown};
use crate::storage::ResponseCache;
use crate::url::{normalize_base_url, resource_url};
use crate::GeoError;
use chrono::Utc;
use scraper::Html;
use std::sync::{Arc, Mutex};

/// Runs GEO audits
pub struct Auditor {
    fetcher: Arc<dyn Fetcher>,
    cache: Option<Arc<Mutex<dyn ResponseCache>>>,
    roster: BotRoster,
    extra_checks: Vec<Box<dyn AuditCheck>>,
}

impl Auditor {
    /// Creates an auditor with the default bot roster and no extra checks
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            cache: None,
            roster: BotRoster::default(),
            extra_checks: Vec::new(),
        }
    }

    /// Creates an auditor from the project configuration
    ///
    /// Builds the HTTP fetcher, extends the bot roster with the configured
    /// extra bots and enables schema validation when extra checks are on.
    /// The cache is not opened here; see [`Auditor::with_cache`].
    pub fn from_config(config: &Config) -> Result<Self, GeoError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let mut auditor =
            Self::new(Arc::new(fetcher)).with_roster(BotRoster::with_extra(&config.extra_bots));

        if config.audit.extra_checks {
            auditor = auditor.with_extra_check(Box::new(SchemaValidationCheck));
        }

        Ok(auditor)
    }

    /// Serves and stores homepage responses through a cache
    pub fn with_cache(mut self, cache: Arc<Mutex<dyn ResponseCache>>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replaces the bot roster
    pub fn with_roster(mut self, roster: BotRoster) -> Self {
        self.roster = roster;
        self
    }

    /// Adds a check whose result is reported alongside the score
    pub fn with_extra_check(mut self, check: Box<dyn AuditCheck>) -> Self {
        self.extra_checks.push(check);
        self
    }

    /// Names of the registered extra checks
    pub fn extra_check_names(&self) -> Vec<&str> {
        self.extra_checks.iter().map(|c| c.name()).collect()
    }

    /// Audits a site
    ///
    /// # Arguments
    ///
    /// * `url` - Site address; a missing scheme defaults to https
    ///
    /// # Returns
    ///
    /// * `Ok(AuditResult)` - The audit, including an unreachable homepage
    ///   (score 0 and `error` set)
    /// * `Err(GeoError)` - The address is not a valid http(s) URL
    pub async fn run(&self, url: &str) -> Result<AuditResult, GeoError> {
        let base_url = normalize_base_url(url)?;
        let robots_url = resource_url(&base_url, "/robots.txt")?;
        let llms_url = resource_url(&base_url, "/llms.txt")?;

        tracing::info!("Auditing {}", base_url);

        let (homepage, robots, llms) = tokio::join!(
            self.fetch_homepage(&base_url),
            self.fetcher.get(&robots_url),
            self.fetcher.get(&llms_url),
        );

        let homepage = match homepage {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Homepage unreachable: {}", e);
                return Ok(AuditResult::unreachable(&base_url, &e.to_string()));
            }
        };

        let robots = log_secondary_failure("robots.txt", robots);
        let llms = log_secondary_failure("llms.txt", llms);

        Ok(self.evaluate(&base_url, &homepage, robots.as_ref(), llms.as_ref()))
    }

    /// Fetches the homepage, going through the cache when configured
    async fn fetch_homepage(&self, url: &str) -> FetchResult<FetchedResponse> {
        if let Some(cache) = &self.cache {
            let cached = match cache.lock() {
                Ok(mut guard) => guard.get(url).unwrap_or_else(|e| {
                    tracing::warn!("Cache read failed: {}", e);
                    None
                }),
                Err(_) => None,
            };
            if let Some(response) = cached {
                tracing::info!("Using cached homepage for {}", url);
                return Ok(response);
            }
        }

        let response = self.fetcher.get(url).await?;

        if let Some(cache) = &self.cache {
            if let Ok(mut guard) = cache.lock() {
                if let Err(e) = guard.put(url, &response) {
                    tracing::warn!("Cache write failed: {}", e);
                }
            }
        }

        Ok(response)
    }

    /// Runs every check on the fetched content and assembles the result
    fn evaluate(
        &self,
        base_url: &str,
        homepage: &FetchedResponse,
        robots: Option<&FetchedResponse>,
        llms: Option<&FetchedResponse>,
    ) -> AuditResult {
        let document = Html::parse_document(&homepage.body);

        let robots = check_robots(robots, &self.roster);
        let llms = check_llms_txt(llms);
        let schema = check_schema(&document);
        let meta = check_meta(&document);
        let content = check_content(&document, base_url);

        let breakdown = ScoreBreakdown::compute(&robots, &llms, &schema, &meta, &content);
        let score = breakdown.total();
        let recommendations =
            build_recommendations(base_url, &robots, &llms, &schema, &meta, &content);

        let ctx = AuditContext {
            url: base_url,
            document: &document,
            schema: &schema,
        };
        let extra_checks = self
            .extra_checks
            .iter()
            .map(|check| {
                tracing::debug!("Running extra check {}", check.name());
                check.run(&ctx)
            })
            .collect();

        tracing::info!("GEO score for {}: {}/100", base_url, score);

        AuditResult {
            url: base_url.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            score,
            band: ScoreBand::from_score(i64::from(score)),
            breakdown,
            robots,
            llms,
            schema,
            meta,
            content,
            recommendations,
            http_status: homepage.status,
            page_size: homepage.size(),
            extra_checks,
            error: None,
        }
    }
}

/// robots.txt and llms.txt failures only degrade their own check
fn log_secondary_failure(
    name: &str,
    result: FetchResult<FetchedResponse>,
) -> Option<FetchedResponse> {
    match result {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::debug!("{} fetch failed: {}", name, e);
            None
        }
    }
}
