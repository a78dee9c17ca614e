//! Integration tests for the harvester
//!
//! These tests use wiremock to serve synthetic browse listings and exercise
//! pagination, classification, failure reporting, and the letter driver.

use wordhoard::classify::FilterConfig;
use wordhoard::config::Config;
use wordhoard::crawler::{
    run_harvest, walk_letter, LetterOutcome, NullProgress, Progress, WalkFailure, Walker,
};
use wordhoard::HoardError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointed at the mock server with no pacing and no robots.txt
fn create_test_config(base_url: &str, letters: &[char]) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.harvest.letters = letters.to_vec();
    config.harvest.request_delay_ms = 0;
    config.harvest.respect_robots = false;
    config.http.retry_delay_ms = 0;
    config
}

/// A browse page with the given entries and an optional link
fn browse_page(entries: &[&str], link: Option<&str>) -> String {
    let items: String = entries
        .iter()
        .map(|e| format!("<li><a href=\"/dictionary/{0}\">{0}</a></li>\n", e))
        .collect();
    let nav = link
        .map(|href| format!("<a href=\"{}\">next</a>", href))
        .unwrap_or_default();
    format!(
        "<html><body>\n<div class=\"entries\"><ul>\n{}</ul></div>\n<nav>\n<a href=\"/browse/dictionary/b\">B</a>\n{}\n</nav></body></html>",
        items, nav
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[derive(Default)]
struct RecordingProgress {
    total: Option<usize>,
    updates: Vec<(char, u8, usize)>,
    finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn letter_done(&mut self, letter: char, percent: u8, accepted: usize) {
        self.updates.push((letter, percent, accepted));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

#[tokio::test]
async fn test_single_page_halts_without_next_link() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/a",
        browse_page(&["aardvark", "Aaron", "abacus", "A1"], None),
    )
    .await;

    let config = create_test_config(&server.uri(), &['a']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'a', &FilterConfig::default()).await;

    match outcome {
        LetterOutcome::Completed {
            letter,
            words,
            pages,
            tally,
        } => {
            assert_eq!(letter, 'a');
            assert_eq!(words, vec!["aardvark", "abacus"]);
            assert_eq!(pages, 1);
            assert_eq!(tally.seen, 4);
            assert_eq!(tally.rejected_total(), 2);
        }
        other => panic!("expected completion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_follows_next_page_links_in_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/c",
        browse_page(&["cab", "cabal"], Some("/browse/dictionary/c/2")),
    )
    .await;
    mount_page(
        &server,
        "/browse/dictionary/c/2",
        browse_page(&["cabbage", "cab-driver"], Some("/browse/dictionary/c/3")),
    )
    .await;
    mount_page(&server, "/browse/dictionary/c/3", browse_page(&["cabin"], None)).await;

    let config = create_test_config(&server.uri(), &['c']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'c', &FilterConfig::default()).await;

    assert!(outcome.is_completed());
    assert_eq!(outcome.pages(), 3);
    assert_eq!(outcome.words(), ["cab", "cabal", "cabbage", "cabin"]);
}

#[tokio::test]
async fn test_link_to_wrong_page_is_not_followed() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/d",
        browse_page(&["dab"], Some("/browse/dictionary/d/3")),
    )
    .await;

    let config = create_test_config(&server.uri(), &['d']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'd', &FilterConfig::default()).await;

    assert!(outcome.is_completed());
    assert_eq!(outcome.pages(), 1);
    assert_eq!(outcome.words(), ["dab"]);
}

#[tokio::test]
async fn test_filter_flags_apply_to_scraped_tokens() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/m",
        browse_page(
            &["mother-in-law", "Mars", "MRI", "m.p.h.", "make do", "mega-", "mango"],
            None,
        ),
    )
    .await;

    let config = create_test_config(&server.uri(), &['m']);
    let walker = Walker::connect(&config).await.unwrap();
    let filter = FilterConfig {
        include_hyphenated: true,
        include_acronyms: true,
        ..FilterConfig::default()
    };

    let outcome = walk_letter(&walker, 'm', &filter).await;

    assert_eq!(outcome.words(), ["mother-in-law", "MRI", "m.p.h.", "mango"]);
}

#[tokio::test]
async fn test_modifier_apostrophe_is_normalized() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/o",
        browse_page(&["\u{02BD}okina", "oak"], None),
    )
    .await;

    let config = create_test_config(&server.uri(), &['o']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'o', &FilterConfig::default()).await;

    assert_eq!(outcome.words(), ["'okina", "oak"]);
}

#[tokio::test]
async fn test_failed_page_is_reported_with_partial_words() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/e",
        browse_page(&["eagle", "ear"], Some("/browse/dictionary/e/2")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/e/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &['e']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'e', &FilterConfig::default()).await;

    assert!(!outcome.is_completed());
    assert_eq!(outcome.words(), ["eagle", "ear"]);
    assert_eq!(outcome.pages(), 1);
    assert_eq!(outcome.failure(), Some((2, &WalkFailure::HttpStatus(500))));
}

#[tokio::test]
async fn test_missing_first_page_fails_letter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/q"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &['q']);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'q', &FilterConfig::default()).await;

    assert!(outcome.words().is_empty());
    assert_eq!(outcome.pages(), 0);
    assert_eq!(outcome.failure(), Some((1, &WalkFailure::HttpStatus(404))));
}

#[tokio::test]
async fn test_transient_error_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/r"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/r"))
        .respond_with(ResponseTemplate::new(200).set_body_string(browse_page(&["rabbit"], None)))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri(), &['r']);
    config.http.max_retries = 1;
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 'r', &FilterConfig::default()).await;

    assert!(outcome.is_completed());
    assert_eq!(outcome.words(), ["rabbit"]);
}

#[tokio::test]
async fn test_page_cap_stops_walk() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/s",
        browse_page(&["sable"], Some("/browse/dictionary/s/2")),
    )
    .await;
    mount_page(
        &server,
        "/browse/dictionary/s/2",
        browse_page(&["sack"], Some("/browse/dictionary/s/3")),
    )
    .await;

    let mut config = create_test_config(&server.uri(), &['s']);
    config.harvest.max_pages_per_letter = Some(2);
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 's', &FilterConfig::default()).await;

    assert!(outcome.is_completed());
    assert_eq!(outcome.pages(), 2);
    assert_eq!(outcome.words(), ["sable", "sack"]);
}

#[tokio::test]
async fn test_robots_disallow_fails_letter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /browse/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/t"))
        .respond_with(ResponseTemplate::new(200).set_body_string(browse_page(&["tab"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server.uri(), &['t']);
    config.harvest.respect_robots = true;
    let walker = Walker::connect(&config).await.unwrap();

    let outcome = walk_letter(&walker, 't', &FilterConfig::default()).await;

    assert!(matches!(
        outcome.failure(),
        Some((1, WalkFailure::RobotsDenied(_)))
    ));
}

#[tokio::test]
async fn test_harvest_concatenates_letters_and_reports_progress() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/browse/dictionary/a",
        browse_page(&["ant", "ape"], Some("/browse/dictionary/a/2")),
    )
    .await;
    mount_page(&server, "/browse/dictionary/a/2", browse_page(&["arc"], None)).await;
    mount_page(&server, "/browse/dictionary/b", browse_page(&["bat", "Bob"], None)).await;

    let config = create_test_config(&server.uri(), &['a', 'b']);
    let walker = Walker::connect(&config).await.unwrap();
    let mut progress = RecordingProgress::default();

    let report = run_harvest(&walker, &config.harvest, &config.filter, &mut progress)
        .await
        .unwrap();

    assert_eq!(report.words, vec!["ant", "ape", "arc", "bat"]);
    assert_eq!(report.letters.len(), 2);
    assert!(report.is_complete());
    assert_eq!(report.total_pages(), 3);

    assert_eq!(progress.total, Some(2));
    assert_eq!(progress.updates, vec![('a', 50, 3), ('b', 100, 1)]);
    assert!(progress.finished);
}

#[tokio::test]
async fn test_fail_fast_aborts_harvest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/a"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(browse_page(&["bat"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &['a', 'b']);
    let walker = Walker::connect(&config).await.unwrap();

    let result = run_harvest(&walker, &config.harvest, &config.filter, &mut NullProgress).await;

    match result {
        Err(HoardError::LetterFailed {
            letter,
            page,
            reason,
            partial,
        }) => {
            assert_eq!(letter, 'a');
            assert_eq!(page, 1);
            assert_eq!(reason, WalkFailure::HttpStatus(502));
            assert!(partial.words.is_empty());
            assert_eq!(partial.letters.len(), 1);
        }
        other => panic!("expected LetterFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_keep_going_records_failure_and_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/a"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    mount_page(&server, "/browse/dictionary/b", browse_page(&["bat"], None)).await;

    let mut config = create_test_config(&server.uri(), &['a', 'b']);
    config.harvest.fail_fast = false;
    let walker = Walker::connect(&config).await.unwrap();
    let mut progress = RecordingProgress::default();

    let report = run_harvest(&walker, &config.harvest, &config.filter, &mut progress)
        .await
        .unwrap();

    assert_eq!(report.words, vec!["bat"]);
    assert!(!report.is_complete());
    assert_eq!(report.failures().count(), 1);
    assert_eq!(progress.updates, vec![('a', 50, 0), ('b', 100, 1)]);
}

#[tokio::test]
async fn test_fail_fast_keeps_words_from_earlier_letters() {
    let server = MockServer::start().await;
    mount_page(&server, "/browse/dictionary/a", browse_page(&["ant", "ape"], None)).await;
    mount_page(&server, "/browse/dictionary/b", browse_page(&["bat"], None)).await;
    Mock::given(method("GET"))
        .and(path("/browse/dictionary/c"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = create_test_config(&server.uri(), &['a', 'b', 'c']);
    let walker = Walker::connect(&config).await.unwrap();

    let result = run_harvest(&walker, &config.harvest, &config.filter, &mut NullProgress).await;

    match result {
        Err(HoardError::LetterFailed {
            letter, partial, ..
        }) => {
            assert_eq!(letter, 'c');
            assert_eq!(partial.words, vec!["ant", "ape", "bat"]);
            assert_eq!(partial.letters.len(), 3);
            assert!(!partial.is_complete());
            assert_eq!(partial.failures().count(), 1);
        }
        other => panic!("expected LetterFailed, got {:?}", other),
    }
}
