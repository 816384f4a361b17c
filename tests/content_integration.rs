//! Integration tests for the content listing operations.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesearch::config::Config;
use sitesearch::content;
use sitesearch::sources::SourceStore;

async fn store_for(server: &MockServer) -> SourceStore {
    let mut config = Config::default();
    config.sources.base_url = server.uri();
    SourceStore::new(config).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn posts_fixture() -> serde_json::Value {
    let posts: Vec<serde_json::Value> = (0..8)
        .map(|i| {
            json!({
                "id": i.to_string(),
                "title": format!("Post {i}"),
                "section": if i % 2 == 0 { "News" } else { "Sports" },
                "body": "school news update",
                "date": "2026-03-01"
            })
        })
        .collect();
    serde_json::Value::Array(posts)
}

#[tokio::test]
async fn latest_posts_takes_leading_slice() {
    let server = MockServer::start().await;
    mount_json(&server, "/posts/posts.json", posts_fixture()).await;

    let store = store_for(&server).await;
    let latest = content::latest_posts(&store, 6).await;
    assert_eq!(latest.len(), 6);
    assert_eq!(latest[0].id, "0");
    assert_eq!(latest[5].id, "5");
}

#[tokio::test]
async fn filter_posts_by_section() {
    let server = MockServer::start().await;
    mount_json(&server, "/posts/posts.json", posts_fixture()).await;

    let store = store_for(&server).await;
    let sports = content::filter_posts(&store, "", "Sports").await;
    assert_eq!(sports.len(), 4);
    assert!(sports.iter().all(|p| p.section == "Sports"));
}

#[tokio::test]
async fn find_article_falls_back_to_first() {
    let server = MockServer::start().await;
    mount_json(&server, "/posts/posts.json", posts_fixture()).await;

    let store = store_for(&server).await;
    let hit = content::find_article(&store, "3").await.unwrap();
    assert_eq!(hit.id, "3");

    let fallback = content::find_article(&store, "no-such-id").await.unwrap();
    assert_eq!(fallback.id, "0");
}

#[tokio::test]
async fn find_article_none_when_stream_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = store_for(&server).await;
    assert!(content::find_article(&store, "1").await.is_none());
}

#[tokio::test]
async fn events_listed_in_source_order() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/data/events.json",
        json!([
            {"title": "Orientation", "date": "June 3", "location": "Gym"},
            {"title": "Sports Day", "date": "June 10"}
        ]),
    )
    .await;

    let store = store_for(&server).await;
    let events = content::events(&store).await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Orientation");
    assert_eq!(events[1].location, None);
}
