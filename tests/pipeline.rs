//! End-to-end refreshes against a mock feed host and a mock translation
//! endpoint.
//!
//! Each test starts its own `MockServer`, serving the feed at `/feed` and
//! translations at `/translate_a/single`.

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use odm::bookmarks::AddOutcome;
use odm::feed::{FeedChannel, FetchError};
use odm::pipeline::{Pipeline, RefreshOptions, RefreshOutcome};
use odm::session::{RefreshStatus, Session};
use odm::translate::{GoogleTranslator, TargetLanguage, Translator};

fn item(title: &str, link: &str, pub_date: Option<&str>) -> String {
    let date = pub_date
        .map(|d| format!("<pubDate>{}</pubDate>", d))
        .unwrap_or_default();
    format!(
        "<item><title>{}</title><link>{}</link>{}</item>",
        title, link, date
    )
}

fn rss(items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Mock</title>{}</channel></rss>"#,
        items.concat()
    )
}

async fn mount_feed(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_translation(server: &MockServer, source: &str, translated: &str) {
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("q", source))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            [[translated, source, null, null, 10]],
            null,
            "en"
        ])))
        .mount(server)
        .await;
}

fn pipeline(server: &MockServer) -> Pipeline<GoogleTranslator> {
    let client = reqwest::Client::new();
    let provider = GoogleTranslator::with_base_url(client.clone(), &server.uri()).unwrap();
    Pipeline::new(
        client,
        "odm-test",
        Translator::new(provider, TargetLanguage::korean()),
    )
}

fn channel(server: &MockServer) -> FeedChannel {
    FeedChannel::new("Mock", format!("{}/feed", server.uri()))
}

const OPTIONS: RefreshOptions = RefreshOptions {
    day_window: 7,
    max_count: 20,
    translate: true,
};

#[tokio::test]
async fn test_refresh_filters_ranks_and_translates() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        rss(&[
            item(
                "Runway Report - Vogue",
                "https://www.vogue.com/article/runway",
                Some("Tue, 14 Oct 2025 10:00:00 GMT"),
            ),
            item(
                "Old Story - Dazed",
                "https://www.dazeddigital.com/old",
                Some("Sun, 07 Sep 2025 10:00:00 GMT"),
            ),
            item("Undated Piece", "https://hypebeast.kr/undated", None),
            item(
                "패션 위크 소식 - Hypebeast",
                "https://hypebeast.kr/week",
                Some("Wed, 15 Oct 2025 08:00:00 +0900"),
            ),
        ]),
    )
    .await;
    mount_translation(&server, "Runway Report", "런웨이 리포트").await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("q", "Undated Piece"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2025, 10, 16, 12, 0, 0).unwrap();
    let outcome = pipeline(&server)
        .refresh_at(&channel(&server), &OPTIONS, now)
        .await
        .unwrap();

    let RefreshOutcome::Entries(entries) = outcome else {
        panic!("expected entries");
    };
    let summary: Vec<(&str, &str, &str)> = entries
        .iter()
        .map(|e| (e.title.as_str(), e.link.as_str(), e.display_date.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Undated Piece", "https://hypebeast.kr/undated", ""),
            ("패션 위크 소식", "https://hypebeast.kr/week", "2025-10-15"),
            ("런웨이 리포트", "https://www.vogue.com/article/runway", "2025-10-14"),
        ]
    );
    assert_eq!(entries[0].published_at, now.fixed_offset());
}

#[tokio::test]
async fn test_refresh_without_translation_skips_provider() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        rss(&[item(
            "Street Style - Highsnobiety",
            "https://www.highsnobiety.com/p/street",
            Some("Wed, 15 Oct 2025 09:00:00 GMT"),
        )]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let options = RefreshOptions {
        translate: false,
        ..OPTIONS
    };
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 0, 0, 0).unwrap();
    let outcome = pipeline(&server)
        .refresh_at(&channel(&server), &options, now)
        .await
        .unwrap();

    let RefreshOutcome::Entries(entries) = outcome else {
        panic!("expected entries");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Street Style");
}

#[tokio::test]
async fn test_refresh_respects_max_count() {
    let server = MockServer::start().await;
    let items: Vec<String> = (0..15)
        .map(|i| {
            item(
                &format!("Story {}", i),
                &format!("https://example.com/{}", i),
                Some(format!("Wed, 15 Oct 2025 {:02}:00:00 GMT", i).as_str()),
            )
        })
        .collect();
    mount_feed(&server, rss(&items)).await;

    let options = RefreshOptions {
        max_count: 10,
        translate: false,
        ..OPTIONS
    };
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 0, 0, 0).unwrap();
    let RefreshOutcome::Entries(entries) = pipeline(&server)
        .refresh_at(&channel(&server), &options, now)
        .await
        .unwrap()
    else {
        panic!("expected entries");
    };

    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].title, "Story 14");
    assert_eq!(entries[9].title, "Story 5");
}

#[tokio::test]
async fn test_refresh_nothing_new() {
    let server = MockServer::start().await;
    mount_feed(
        &server,
        rss(&[item(
            "Archive Piece",
            "https://example.com/archive",
            Some("Mon, 01 Jan 2024 00:00:00 GMT"),
        )]),
    )
    .await;

    let now = Utc.with_ymd_and_hms(2025, 10, 16, 0, 0, 0).unwrap();
    let outcome = pipeline(&server)
        .refresh_at(&channel(&server), &OPTIONS, now)
        .await
        .unwrap();
    assert_eq!(outcome, RefreshOutcome::NothingNew);
}

#[tokio::test]
async fn test_refresh_http_error_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server)
        .refresh(&channel(&server), &OPTIONS)
        .await;
    assert!(matches!(result, Err(FetchError::HttpStatus(502))));
}

#[tokio::test]
async fn test_malformed_feed_keeps_valid_items() {
    let server = MockServer::start().await;
    let body = format!(
        "<rss><channel>{}<item><title>Broken <b></title>{}",
        item(
            "Intact - Vogue",
            "https://www.vogue.com/intact",
            Some("Wed, 15 Oct 2025 09:00:00 GMT")
        ),
        "<link>https://www.vogue.com/broken</link>"
    );
    mount_feed(&server, body).await;

    let options = RefreshOptions {
        translate: false,
        ..OPTIONS
    };
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 0, 0, 0).unwrap();
    let outcome = pipeline(&server)
        .refresh_at(&channel(&server), &options, now)
        .await
        .unwrap();

    let RefreshOutcome::Entries(entries) = outcome else {
        panic!("expected entries");
    };
    assert!(entries
        .iter()
        .any(|e| e.title == "Intact" && e.link == "https://www.vogue.com/intact"));
}

#[tokio::test]
async fn test_session_refresh_and_bookmarks() {
    let server = MockServer::start().await;
    let recent = (Utc::now() - Duration::hours(3)).to_rfc2822();
    mount_feed(
        &server,
        rss(&[
            item("Paris Fashion Week - WWD", "https://wwd.com/pfw", Some(recent.as_str())),
            item("Milan Wrap - WWD", "https://wwd.com/milan", Some(recent.as_str())),
        ]),
    )
    .await;
    mount_translation(&server, "Paris Fashion Week", "파리 패션위크").await;
    mount_translation(&server, "Milan Wrap", "밀라노 정리").await;

    let mut session = Session::new(pipeline(&server), vec![channel(&server)], OPTIONS);

    let status = session.refresh().await.unwrap();
    assert_eq!(status, RefreshStatus::Updated(2));
    assert_eq!(session.current()[0].title, "파리 패션위크");

    let (outcome, _) = session.save(0).unwrap();
    assert_eq!(outcome, AddOutcome::Added);
    let (outcome, _) = session.save(0).unwrap();
    assert_eq!(outcome, AddOutcome::AlreadyPresent);
    session.save(1).unwrap();
    assert_eq!(session.bookmarks().len(), 2);

    let removed = session.bookmarks_mut().remove_at(0).unwrap();
    assert_eq!(removed.link, "https://wwd.com/pfw");
    assert_eq!(session.bookmarks().list()[0].link, "https://wwd.com/milan");
}

#[tokio::test]
async fn test_session_keeps_results_on_fetch_error() {
    let server = MockServer::start().await;
    let recent = (Utc::now() - Duration::hours(1)).to_rfc2822();
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss(&[item(
            "Kept Entry",
            "https://example.com/kept",
            Some(recent.as_str()),
        )])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let options = RefreshOptions {
        translate: false,
        ..OPTIONS
    };
    let mut session = Session::new(pipeline(&server), vec![channel(&server)], options);

    assert_eq!(session.refresh().await.unwrap(), RefreshStatus::Updated(1));
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus(503)));
    assert_eq!(session.current()[0].title, "Kept Entry");
}
