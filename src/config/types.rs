use super::defaults::*;
use crate::sources::CachePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Sources
// ============================================================================

/// Where each JSON collection lives, relative to the site base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_index_path")]
    pub page_index_path: String,
    #[serde(default = "default_posts_path")]
    pub posts_path: String,
    #[serde(default = "default_memos_path")]
    pub memos_path: String,
    #[serde(default = "default_events_path")]
    pub events_path: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_index_path: default_page_index_path(),
            posts_path: default_posts_path(),
            memos_path: default_memos_path(),
            events_path: default_events_path(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_page_index_path() -> String {
    DEFAULT_PAGE_INDEX_PATH.to_string()
}
fn default_posts_path() -> String {
    DEFAULT_POSTS_PATH.to_string()
}
fn default_memos_path() -> String {
    DEFAULT_MEMOS_PATH.to_string()
}
fn default_events_path() -> String {
    DEFAULT_EVENTS_PATH.to_string()
}

// ============================================================================
// Search Limits
// ============================================================================

/// Per-collection result caps for one aggregated search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    #[serde(default = "default_page_limit")]
    pub max_page_results: usize,
    #[serde(default = "default_article_limit")]
    pub max_article_results: usize,
    #[serde(default = "default_memo_limit")]
    pub max_memo_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_page_results: default_page_limit(),
            max_article_results: default_article_limit(),
            max_memo_results: default_memo_limit(),
        }
    }
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_RESULT_LIMIT
}
fn default_article_limit() -> usize {
    DEFAULT_ARTICLE_RESULT_LIMIT
}
fn default_memo_limit() -> usize {
    DEFAULT_MEMO_RESULT_LIMIT
}

// ============================================================================
// Cache Policy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Re-fetch on every use.
    #[default]
    Disabled,
    /// Fetch once per cache lifetime; a failed load caches empty.
    Forever,
    /// Re-fetch once the cached copy is older than `ttlSeconds`.
    Ttl,
}

/// Caching knob for one collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CachePolicyConfig {
    #[serde(default)]
    pub mode: CacheMode,
    /// Required when `mode` is `ttl`; ignored otherwise.
    pub ttl_seconds: Option<u64>,
}

impl CachePolicyConfig {
    pub fn forever() -> Self {
        Self {
            mode: CacheMode::Forever,
            ttl_seconds: None,
        }
    }

    /// Resolve into the runtime policy. A `ttl` mode without a ttl value
    /// falls back to disabled (validation flags this separately).
    pub fn policy(&self) -> CachePolicy {
        match self.mode {
            CacheMode::Disabled => CachePolicy::Disabled,
            CacheMode::Forever => CachePolicy::Forever,
            CacheMode::Ttl => match self.ttl_seconds {
                Some(secs) => CachePolicy::Ttl(Duration::from_secs(secs)),
                None => CachePolicy::Disabled,
            },
        }
    }
}

/// Per-collection cache policies.
///
/// The defaults mirror the long-standing site behavior: the page index is
/// fetched once and held, while content streams are re-fetched per use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    #[serde(default = "CachePolicyConfig::forever")]
    pub pages: CachePolicyConfig,
    #[serde(default)]
    pub articles: CachePolicyConfig,
    #[serde(default)]
    pub memos: CachePolicyConfig,
    #[serde(default)]
    pub events: CachePolicyConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pages: CachePolicyConfig::forever(),
            articles: CachePolicyConfig::default(),
            memos: CachePolicyConfig::default(),
            events: CachePolicyConfig::default(),
        }
    }
}

// ============================================================================
// HTTP
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
