//! Scrape orchestration: cache lookup, fetch, extract, cache write.
//!
//! `scrape` always returns a `ScrapedContent`. Every fetch or extraction
//! failure collapses into [`ScrapedContent::failed`], which is never cached.

use std::sync::Arc;

use pagesift_core::{AppConfig, CacheDb, Error, ScrapeCache, ScrapedContent};

use crate::extract::{Extractor, SelectorExtractor};
use crate::fetch::{FetchClient, FetchConfig, Fetcher};

/// The scrape pipeline with its collaborators injected.
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    cache: ScrapeCache,
}

impl Scraper {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>, cache: ScrapeCache) -> Self {
        Self { fetcher, extractor, cache }
    }

    /// Wire the reqwest fetcher, the selector extractor and the SQLite cache
    /// at `config.db_path`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let db = CacheDb::open(&config.db_path).await?;
        Self::with_db(config, db)
    }

    /// Like [`Scraper::from_config`] but over an already opened database.
    pub fn with_db(config: &AppConfig, db: CacheDb) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        let cache = ScrapeCache::new(Arc::new(db)).with_timeout(config.cache_timeout());
        Ok(Self::new(Arc::new(fetcher), Arc::new(SelectorExtractor::new()), cache))
    }

    pub fn cache(&self) -> &ScrapeCache {
        &self.cache
    }

    /// Return cached content for `url`, or fetch, extract and cache it.
    pub async fn scrape(&self, url: &str) -> ScrapedContent {
        tracing::info!(url, "starting scrape");

        if let Some(hit) = self.cache.lookup(url).await {
            tracing::info!(url, "returning cached content");
            return hit.content;
        }

        self.scrape_live(url).await
    }

    /// Skip the cache read and scrape `url` from the network.
    pub async fn refresh(&self, url: &str) -> ScrapedContent {
        tracing::info!(url, "refreshing scrape");
        self.scrape_live(url).await
    }

    async fn scrape_live(&self, url: &str) -> ScrapedContent {
        match self.fetch_and_extract(url).await {
            Ok(content) => {
                self.cache.store(&content).await;
                content
            }
            Err(e) => {
                tracing::error!(url, error = %e, "scrape failed");
                ScrapedContent::failed(url)
            }
        }
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<ScrapedContent, Error> {
        let response = self.fetcher.fetch(url).await?;

        if !response.is_markup() {
            return Err(Error::UnsupportedContent(response.content_type.unwrap_or_default()));
        }

        self.extractor.extract(&response.text(), url)
    }
}
