//! HTML fragment rendering for search results and content listings.
//!
//! Every text field crossing into markup goes through [`escape_html`];
//! the content files are editable by non-developers and must be treated
//! as untrusted.

use crate::model::{ArticleEntry, EventEntry, MemoEntry, SearchResult};

/// Default byline for articles without an author.
const DEFAULT_BYLINE: &str = "School Paper";

/// Cover image used when a post has none.
const COVER_PLACEHOLDER: &str = "images/post-placeholder.jpg";

/// Replace the HTML-special characters `& < > " '` with entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render search result rows: a kind tag, a titled link, and for page
/// hits an excerpt line beneath the link.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "<p>No results.</p>".to_string();
    }

    results
        .iter()
        .map(|r| {
            let mut row = format!(
                "<div><span class=\"tag\">{}</span> <a href=\"{}\">{}</a>",
                r.kind.label(),
                escape_html(&r.url),
                escape_html(&r.title),
            );
            if let Some(excerpt) = &r.excerpt {
                row.push_str(&format!(
                    "<p class=\"muted\">{}</p>",
                    escape_html(excerpt)
                ));
            }
            row.push_str("</div>");
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one post card for the blog list and the homepage strip.
pub fn render_post_card(post: &ArticleEntry) -> String {
    format!(
        "<article class=\"card\">\
         <img src=\"{cover}\" alt=\"\">\
         <h3><a href=\"{link}\">{title}</a></h3>\
         <p class=\"muted\">{section} • {date}</p>\
         <p>{teaser}</p>\
         </article>",
        cover = escape_html(post.cover.as_deref().unwrap_or(COVER_PLACEHOLDER)),
        link = escape_html(&post.link()),
        title = escape_html(&post.title),
        section = escape_html(&post.section),
        date = escape_html(&post.date),
        teaser = escape_html(post.teaser.as_deref().unwrap_or("")),
    )
}

/// Render a full article view.
pub fn render_article(post: &ArticleEntry) -> String {
    let cover = post
        .cover
        .as_deref()
        .map(|c| format!("<img src=\"{}\" alt=\"\">", escape_html(c)))
        .unwrap_or_default();
    format!(
        "<article>\
         <h1>{title}</h1>\
         <div class=\"meta\">{section} • {author} • {date}</div>\
         {cover}\
         <div>{body}</div>\
         </article>",
        title = escape_html(&post.title),
        section = escape_html(&post.section),
        author = escape_html(post.author.as_deref().unwrap_or(DEFAULT_BYLINE)),
        date = escape_html(&post.date),
        body = escape_html(&post.body),
    )
}

/// Render one memo card, with an "Open document" button when the memo
/// has an attached file.
pub fn render_memo_card(memo: &MemoEntry) -> String {
    let file_link = memo
        .file
        .as_deref()
        .map(|f| {
            format!(
                "<p><a class=\"btn\" href=\"{}\">Open document</a></p>",
                escape_html(f)
            )
        })
        .unwrap_or_default();
    format!(
        "<article class=\"card\">\
         <h3>{title}</h3>\
         <p class=\"muted\">{date}</p>\
         <p>{summary}</p>\
         {file_link}\
         </article>",
        title = escape_html(&memo.title),
        date = escape_html(&memo.date),
        summary = escape_html(memo.summary.as_deref().unwrap_or("")),
    )
}

/// Render the event list items shared by the homepage and calendar.
pub fn render_event_items(events: &[EventEntry]) -> String {
    events
        .iter()
        .map(|e| {
            format!(
                "<li><strong>{date}</strong> — {title} <span class=\"muted\">{location}</span></li>",
                date = escape_html(&e.date),
                title = escape_html(&e.title),
                location = escape_html(e.location.as_deref().unwrap_or("")),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
