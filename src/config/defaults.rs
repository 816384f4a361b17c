/// Default configuration constants used across the system.

/// Default site base URL fetched from.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default path of the prebuilt page search index.
pub const DEFAULT_PAGE_INDEX_PATH: &str = "data/search-index.json";

/// Default path of the article stream.
pub const DEFAULT_POSTS_PATH: &str = "posts/posts.json";

/// Default path of the memo stream.
pub const DEFAULT_MEMOS_PATH: &str = "data/memos.json";

/// Default path of the event stream.
pub const DEFAULT_EVENTS_PATH: &str = "data/events.json";

/// Maximum page hits returned per search.
pub const DEFAULT_PAGE_RESULT_LIMIT: usize = 12;

/// Maximum article hits returned per search.
pub const DEFAULT_ARTICLE_RESULT_LIMIT: usize = 8;

/// Maximum memo hits returned per search.
pub const DEFAULT_MEMO_RESULT_LIMIT: usize = 8;

/// Extra score when a query term appears in a page title.
pub const TITLE_MATCH_BONUS: u32 = 3;

/// Extra score when a query term appears in a page's keywords.
pub const KEYWORD_MATCH_BONUS: u32 = 1;

/// Default HTTP request timeout.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Maximum redirects followed per fetch.
pub const DEFAULT_REDIRECT_LIMIT: usize = 3;

/// Number of posts shown by the homepage "latest" listing.
pub const DEFAULT_LATEST_POSTS: usize = 6;

/// Link used for memo hits without an attached document.
pub const MEMO_FALLBACK_URL: &str = "schoolmemo.html";
