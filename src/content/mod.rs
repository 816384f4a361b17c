//! Content listings over the article, memo, and event streams: the
//! homepage "latest posts" strip, the blog filter, single-article lookup,
//! and the memo/event listings.

use crate::model::{ArticleEntry, EventEntry, MemoEntry};
use crate::sources::SourceStore;

/// First `n` posts in source order (the content files are authored
/// newest-first).
pub async fn latest_posts(store: &SourceStore, n: usize) -> Vec<ArticleEntry> {
    let articles = store.articles().await;
    articles.iter().take(n).cloned().collect()
}

/// Posts matching a section filter and a free-text filter.
///
/// An empty section matches every section; an empty text matches every
/// post. Text matches case-insensitively against title or body.
pub async fn filter_posts(store: &SourceStore, text: &str, section: &str) -> Vec<ArticleEntry> {
    let articles = store.articles().await;
    filter_post_slice(&articles, text, section)
}

/// Look up an article by id, falling back to the first article when the
/// id is unknown. `None` only when there are no articles at all.
pub async fn find_article(store: &SourceStore, id: &str) -> Option<ArticleEntry> {
    let articles = store.articles().await;
    articles
        .iter()
        .find(|a| a.id == id)
        .or_else(|| articles.first())
        .cloned()
}

/// Memos whose card text (title, date, summary) contains the filter,
/// case-insensitively. An empty filter matches everything.
pub async fn filter_memos(store: &SourceStore, text: &str) -> Vec<MemoEntry> {
    let memos = store.memos().await;
    filter_memo_slice(&memos, text)
}

/// All events in source order.
pub async fn events(store: &SourceStore) -> Vec<EventEntry> {
    store.events().await.iter().cloned().collect()
}

fn filter_post_slice(articles: &[ArticleEntry], text: &str, section: &str) -> Vec<ArticleEntry> {
    let needle = text.trim().to_lowercase();
    articles
        .iter()
        .filter(|a| section.is_empty() || a.section == section)
        .filter(|a| {
            needle.is_empty()
                || a.title.to_lowercase().contains(&needle)
                || a.body.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

fn filter_memo_slice(memos: &[MemoEntry], text: &str) -> Vec<MemoEntry> {
    let needle = text.trim().to_lowercase();
    memos
        .iter()
        .filter(|m| {
            if needle.is_empty() {
                return true;
            }
            let card_text = format!(
                "{} {} {}",
                m.title,
                m.date,
                m.summary.as_deref().unwrap_or("")
            );
            card_text.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
