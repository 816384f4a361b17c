use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Source Records
// ============================================================================

/// One entry in the prebuilt page search index (`data/search-index.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page title shown as the result link label.
    pub title: String,
    /// Target URL. Entries with an empty url never surface as results.
    #[serde(default)]
    pub url: String,
    /// Keyword strings. The index may store these as an array or a single
    /// whitespace-joined string; both shapes decode to a list.
    #[serde(default, deserialize_with = "keywords_from_list_or_string")]
    pub keywords: Vec<String>,
    /// Short excerpt shown beneath the result link.
    #[serde(default)]
    pub excerpt: String,
}

/// One article from the posts stream (`posts/posts.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleEntry {
    /// Stable article id, used to build `article.html?id=` links.
    pub id: String,
    pub title: String,
    /// Section name (e.g. "News", "Sports").
    pub section: String,
    /// Full article body text.
    pub body: String,
    /// Optional short teaser shown on cards.
    pub teaser: Option<String>,
    /// Optional cover image path.
    pub cover: Option<String>,
    /// Optional author byline.
    pub author: Option<String>,
    /// Display date string as authored in the content file.
    pub date: String,
}

impl ArticleEntry {
    /// Link to the article page, id carried in the query string.
    pub fn link(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.id.as_bytes()).collect();
        format!("article.html?id={encoded}")
    }
}

/// One memo from the memo stream (`data/memos.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoEntry {
    pub title: String,
    /// Display date string as authored in the content file.
    pub date: String,
    pub summary: Option<String>,
    /// Optional link to the memo document.
    pub file: Option<String>,
}

impl MemoEntry {
    /// Link target for a memo hit: the attached document when present,
    /// otherwise the memo listing page.
    pub fn link(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| crate::config::MEMO_FALLBACK_URL.to_string())
    }
}

/// One calendar event (`data/events.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
}

/// Accept `keywords` as either `["a", "b"]` or `"a b"`.
///
/// Any other shape is a decode error, which fails the whole source
/// predictably instead of silently coercing.
fn keywords_from_list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        List(Vec<String>),
        Joined(String),
    }

    match Keywords::deserialize(deserializer)? {
        Keywords::List(list) => Ok(list),
        Keywords::Joined(joined) => {
            Ok(joined.split_whitespace().map(String::from).collect())
        }
    }
}

// ============================================================================
// Search Results
// ============================================================================

/// Which collection a search result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Page,
    Article,
    Memo,
}

impl ResultKind {
    /// Display label shown in the result's kind tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Article => "Article",
            Self::Memo => "Memo",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single aggregated search hit.
///
/// Pure projection of a source record plus a query; never persisted and
/// never reused across queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub kind: ResultKind,
    pub title: String,
    pub url: String,
    /// Excerpt line, populated for page hits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Relevance score, populated for page hits only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

// ============================================================================
// Query
// ============================================================================

/// Minimum character length for a page-matching term.
pub const MIN_TERM_CHARS: usize = 2;

/// A normalized user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Trimmed, lowercased raw query. Used whole for article/memo
    /// substring matching.
    pub normalized: String,
    /// Whitespace-split tokens of at least [`MIN_TERM_CHARS`] characters.
    /// Used for page scoring only; may be empty for short queries.
    pub terms: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        let terms = normalized
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_TERM_CHARS)
            .map(String::from)
            .collect();
        Self { normalized, terms }
    }

    /// An empty query produces no results at all.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
