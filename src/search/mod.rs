use crate::config::{KEYWORD_MATCH_BONUS, TITLE_MATCH_BONUS};
use crate::model::{ArticleEntry, MemoEntry, PageEntry, Query, ResultKind, SearchResult};
use crate::sources::SourceStore;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

// ============================================================================
// Service
// ============================================================================

/// The ordered hits of one search call, tagged with its generation.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Monotonic per-service query counter. A caller displaying results
    /// asynchronously can drop outcomes superseded by a newer query.
    pub generation: u64,
    pub results: Vec<SearchResult>,
}

/// Aggregated search over the page index, articles, and memos.
///
/// The three source loads for one call run concurrently and are awaited
/// jointly; each absorbs its own failure, so a dead source only removes
/// its own hits. In-flight fetches are never cancelled by a newer query;
/// staleness is detected through the generation counter instead.
#[derive(Debug)]
pub struct SearchService {
    store: SourceStore,
    generation: AtomicU64,
}

impl SearchService {
    pub fn new(store: SourceStore) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &SourceStore {
        &self.store
    }

    /// Run one aggregated search. Always returns a well-formed (possibly
    /// empty) sequence; source failures never surface here.
    pub async fn search(&self, raw_query: &str) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = Query::parse(raw_query);
        if query.is_empty() {
            return SearchOutcome {
                generation,
                results: Vec::new(),
            };
        }

        let (pages, articles, memos) =
            tokio::join!(self.store.pages(), self.store.articles(), self.store.memos());

        let limits = &self.store.config().search;
        let mut results = match_pages(&pages, &query, limits.max_page_results);
        results.extend(match_articles(&articles, &query, limits.max_article_results));
        results.extend(match_memos(&memos, &query, limits.max_memo_results));

        debug!(
            "Query '{}' matched {} results (generation {generation})",
            query.normalized,
            results.len()
        );
        SearchOutcome {
            generation,
            results,
        }
    }

    /// Generation of the most recently started query.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a newer query has started since this outcome's query did.
    pub fn is_stale(&self, outcome: &SearchOutcome) -> bool {
        outcome.generation < self.current_generation()
    }
}

// ============================================================================
// Page Matching
// ============================================================================

/// Score a page against the query's terms.
///
/// Each term present in the haystack (title, keywords, excerpt) scores 1,
/// with bonuses when it also appears in the title or keywords. Queries
/// that tokenized to no terms always score 0.
fn score_page(page: &PageEntry, query: &Query) -> u32 {
    let title = page.title.to_lowercase();
    let keywords = page.keywords.join(" ").to_lowercase();
    let excerpt = page.excerpt.to_lowercase();
    let haystack = format!("{title} {keywords} {excerpt}");

    let mut score = 0;
    for term in &query.terms {
        if haystack.contains(term.as_str()) {
            score += 1;
            if title.contains(term.as_str()) {
                score += TITLE_MATCH_BONUS;
            }
            if keywords.contains(term.as_str()) {
                score += KEYWORD_MATCH_BONUS;
            }
        }
    }
    score
}

fn match_pages(pages: &[PageEntry], query: &Query, limit: usize) -> Vec<SearchResult> {
    let mut hits: Vec<(u32, &PageEntry)> = pages
        .iter()
        .filter(|p| !p.url.is_empty())
        .filter_map(|p| {
            let score = score_page(p, query);
            (score > 0).then_some((score, p))
        })
        .collect();

    // sort_by is stable: equal scores keep index order.
    hits.sort_by(|a, b| b.0.cmp(&a.0));
    hits.truncate(limit);

    hits.into_iter()
        .map(|(score, p)| SearchResult {
            kind: ResultKind::Page,
            title: p.title.clone(),
            url: p.url.clone(),
            excerpt: (!p.excerpt.is_empty()).then(|| p.excerpt.clone()),
            score: Some(score),
        })
        .collect()
}

// ============================================================================
// Article / Memo Matching
// ============================================================================

fn match_articles(articles: &[ArticleEntry], query: &Query, limit: usize) -> Vec<SearchResult> {
    articles
        .iter()
        .filter(|a| {
            format!("{}{}", a.title, a.body)
                .to_lowercase()
                .contains(&query.normalized)
        })
        .take(limit)
        .map(|a| SearchResult {
            kind: ResultKind::Article,
            title: a.title.clone(),
            url: a.link(),
            excerpt: None,
            score: None,
        })
        .collect()
}

fn match_memos(memos: &[MemoEntry], query: &Query, limit: usize) -> Vec<SearchResult> {
    memos
        .iter()
        .filter(|m| {
            format!("{}{}", m.title, m.summary.as_deref().unwrap_or(""))
                .to_lowercase()
                .contains(&query.normalized)
        })
        .take(limit)
        .map(|m| SearchResult {
            kind: ResultKind::Memo,
            title: m.title.clone(),
            url: m.link(),
            excerpt: None,
            score: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(title: &str, url: &str, keywords: &[&str], excerpt: &str) -> PageEntry {
        PageEntry {
            title: title.to_string(),
            url: url.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            excerpt: excerpt.to_string(),
        }
    }

    fn article(id: &str, title: &str, body: &str) -> ArticleEntry {
        ArticleEntry {
            id: id.to_string(),
            title: title.to_string(),
            section: "News".to_string(),
            body: body.to_string(),
            teaser: None,
            cover: None,
            author: None,
            date: "2026-01-15".to_string(),
        }
    }

    fn memo(title: &str, summary: Option<&str>, file: Option<&str>) -> MemoEntry {
        MemoEntry {
            title: title.to_string(),
            date: "2026-01-15".to_string(),
            summary: summary.map(String::from),
            file: file.map(String::from),
        }
    }

    #[test]
    fn worked_example_scores_four() {
        // Page hit: +1 haystack containment, +3 title match.
        let p = page("Enrollment", "/enroll", &["admission"], "apply now");
        let query = Query::parse("enrollment");
        assert_eq!(score_page(&p, &query), 4);
    }

    #[test]
    fn title_match_outscores_excerpt_match() {
        let query = Query::parse("library");
        let in_title = page("Library Hours", "/library", &[], "open daily");
        let in_excerpt = page("Campus Hours", "/hours", &[], "library open daily");
        assert!(score_page(&in_title, &query) > score_page(&in_excerpt, &query));
    }

    #[test]
    fn keyword_match_adds_bonus() {
        let query = Query::parse("admission");
        let with_kw = page("Enroll", "/a", &["admission"], "");
        let in_excerpt = page("Enroll", "/b", &[], "admission");
        assert_eq!(score_page(&with_kw, &query), 2);
        assert_eq!(score_page(&in_excerpt, &query), 1);
    }

    #[test]
    fn short_query_yields_no_page_terms() {
        let query = Query::parse("x");
        let p = page("X Marks", "/x", &[], "x");
        assert_eq!(score_page(&p, &query), 0);
        assert!(match_pages(&[p], &query, 12).is_empty());
    }

    #[test]
    fn pages_without_url_are_excluded() {
        let query = Query::parse("enrollment");
        let p = page("Enrollment", "", &[], "");
        assert!(match_pages(&[p], &query, 12).is_empty());
    }

    #[test]
    fn page_ties_keep_source_order() {
        let query = Query::parse("hours");
        let pages = vec![
            page("Office Hours", "/office", &[], ""),
            page("Library Hours", "/library", &[], ""),
            page("Hours", "/hours", &[], ""),
        ];
        let hits = match_pages(&pages, &query, 12);
        let urls: Vec<&str> = hits.iter().map(|h| h.url.as_str()).collect();
        assert_eq!(urls, vec!["/office", "/library", "/hours"]);
    }

    #[test]
    fn page_hits_sorted_by_score_then_truncated() {
        let query = Query::parse("club schedule");
        let pages = vec![
            page("Bulletin", "/bulletin", &[], "club schedule posted"),
            page("Club Schedule", "/clubs", &[], ""),
        ];
        let hits = match_pages(&pages, &query, 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "/clubs");
        assert!(hits[0].score.unwrap() > 2);
    }

    #[test]
    fn article_matches_full_query_substring() {
        // Tokenization does not apply to articles: the whole normalized
        // query must appear as a substring.
        let query = Query::parse("Sports Day");
        let articles = vec![
            article("1", "Sports Day", "enrollment booth open"),
            article("2", "Day of Sports", "separate words only"),
        ];
        let hits = match_articles(&articles, &query, 8);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Sports Day");
        assert_eq!(hits[0].url, "article.html?id=1");
    }

    #[test]
    fn article_body_substring_matches() {
        let query = Query::parse("enrollment");
        let hits = match_articles(&[article("1", "Sports Day", "enrollment booth open")], &query, 8);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn articles_preserve_source_order_and_cap() {
        let query = Query::parse("week");
        let articles: Vec<ArticleEntry> = (0..10)
            .map(|i| article(&i.to_string(), &format!("Week {i}"), "school week"))
            .collect();
        let hits = match_articles(&articles, &query, 8);
        assert_eq!(hits.len(), 8);
        assert_eq!(hits[0].title, "Week 0");
        assert_eq!(hits[7].title, "Week 7");
    }

    #[test]
    fn memo_link_falls_back_when_no_file() {
        let query = Query::parse("exam");
        let memos = vec![
            memo("Exam Schedule", None, Some("files/exam.pdf")),
            memo("Midterm Exams", None, None),
        ];
        let hits = match_memos(&memos, &query, 8);
        assert_eq!(hits[0].url, "files/exam.pdf");
        assert_eq!(hits[1].url, crate::config::MEMO_FALLBACK_URL);
    }

    #[test]
    fn memo_summary_is_searched() {
        let query = Query::parse("uniform");
        let memos = vec![memo("Reminder", Some("new uniform policy"), None)];
        assert_eq!(match_memos(&memos, &query, 8).len(), 1);
    }
}
