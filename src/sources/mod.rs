mod cache;
mod client;

pub use cache::{CachePolicy, CacheSlot, SourceCache};
pub use client::{SourceClient, SourceError};

use crate::config::Config;
use crate::model::{ArticleEntry, EventEntry, MemoEntry, PageEntry};
use std::sync::Arc;
use tracing::warn;

/// Cached access to the site's JSON collections.
///
/// Every loader absorbs its source's failures: a transport error or a
/// malformed payload yields an empty collection and a `warn!`, never an
/// error to the caller. A bad source can therefore never take down the
/// other two in an aggregated search.
#[derive(Debug)]
pub struct SourceStore {
    client: SourceClient,
    cache: SourceCache,
    config: Config,
}

impl SourceStore {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = SourceClient::new(&config)?;
        Ok(Self {
            client,
            cache: SourceCache::default(),
            config,
        })
    }

    /// The prebuilt page search index.
    pub async fn pages(&self) -> Arc<Vec<PageEntry>> {
        let path = self.config.sources.page_index_path.clone();
        self.cache
            .pages
            .get_or_load(self.config.cache.pages.policy(), || {
                fetch_or_empty(&self.client, path, "page index")
            })
            .await
    }

    /// The article stream.
    pub async fn articles(&self) -> Arc<Vec<ArticleEntry>> {
        let path = self.config.sources.posts_path.clone();
        self.cache
            .articles
            .get_or_load(self.config.cache.articles.policy(), || {
                fetch_or_empty(&self.client, path, "articles")
            })
            .await
    }

    /// The memo stream.
    pub async fn memos(&self) -> Arc<Vec<MemoEntry>> {
        let path = self.config.sources.memos_path.clone();
        self.cache
            .memos
            .get_or_load(self.config.cache.memos.policy(), || {
                fetch_or_empty(&self.client, path, "memos")
            })
            .await
    }

    /// The event stream.
    pub async fn events(&self) -> Arc<Vec<EventEntry>> {
        let path = self.config.sources.events_path.clone();
        self.cache
            .events
            .get_or_load(self.config.cache.events.policy(), || {
                fetch_or_empty(&self.client, path, "events")
            })
            .await
    }

    /// Drop all cached collections.
    pub async fn reset_cache(&self) {
        self.cache.reset().await;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

async fn fetch_or_empty<T: serde::de::DeserializeOwned>(
    client: &SourceClient,
    path: String,
    label: &str,
) -> Arc<Vec<T>> {
    match client.fetch_entries(&path).await {
        Ok(entries) => Arc::new(entries),
        Err(err) => {
            warn!("Failed to load {label} from '{path}': {err}");
            Arc::new(Vec::new())
        }
    }
}
