use super::{CacheMode, CachePolicyConfig, Config};
use anyhow::Result;
use url::Url;

/// Validation errors for configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a configuration object.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    // Validate base URL
    if config.sources.base_url.is_empty() {
        errors.push(ConfigValidationError {
            path: "sources.baseUrl".to_string(),
            message: "Base URL is required".to_string(),
        });
    } else if Url::parse(&config.sources.base_url).is_err() {
        errors.push(ConfigValidationError {
            path: "sources.baseUrl".to_string(),
            message: format!("Not a valid URL: '{}'", config.sources.base_url),
        });
    }

    // Validate source paths
    for (path, value) in [
        ("sources.pageIndexPath", &config.sources.page_index_path),
        ("sources.postsPath", &config.sources.posts_path),
        ("sources.memosPath", &config.sources.memos_path),
        ("sources.eventsPath", &config.sources.events_path),
    ] {
        if value.is_empty() {
            errors.push(ConfigValidationError {
                path: path.to_string(),
                message: "Source path must not be empty".to_string(),
            });
        }
    }

    // Validate result limits
    for (path, value) in [
        ("search.maxPageResults", config.search.max_page_results),
        ("search.maxArticleResults", config.search.max_article_results),
        ("search.maxMemoResults", config.search.max_memo_results),
    ] {
        if value == 0 {
            errors.push(ConfigValidationError {
                path: path.to_string(),
                message: "Result limit must be greater than 0".to_string(),
            });
        }
    }

    // Validate cache policies
    for (path, policy) in [
        ("cache.pages", &config.cache.pages),
        ("cache.articles", &config.cache.articles),
        ("cache.memos", &config.cache.memos),
        ("cache.events", &config.cache.events),
    ] {
        validate_cache_policy(path, policy, &mut errors);
    }

    if config.http.timeout_ms == 0 {
        errors.push(ConfigValidationError {
            path: "http.timeoutMs".to_string(),
            message: "Timeout must be greater than 0".to_string(),
        });
    }

    errors
}

fn validate_cache_policy(
    path: &str,
    policy: &CachePolicyConfig,
    errors: &mut Vec<ConfigValidationError>,
) {
    if policy.mode == CacheMode::Ttl {
        match policy.ttl_seconds {
            None => errors.push(ConfigValidationError {
                path: format!("{path}.ttlSeconds"),
                message: "ttl cache mode requires ttlSeconds".to_string(),
            }),
            Some(0) => errors.push(ConfigValidationError {
                path: format!("{path}.ttlSeconds"),
                message: "ttlSeconds must be greater than 0".to_string(),
            }),
            Some(_) => {}
        }
    }
}

/// Validate configuration and return Result.
pub fn validate_config_object(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Configuration validation failed:\n{}", messages.join("\n"));
    }
}
