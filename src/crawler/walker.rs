//! Per-letter page walk
//!
//! Starting from page 1 of a letter's browse listing, the walker fetches a
//! page, classifies its entry tokens, and follows the link to the next page
//! for as long as one is present. Exactly one request is in flight at a time.

use crate::classify::{classify, normalize, FilterConfig, Rejection, Verdict};
use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_with_retry, FetchResult};
use crate::crawler::parser::parse_browse_page;
use crate::robots::{fetch_robots, ParsedRobots};
use crate::HoardError;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Why a letter's walk stopped early
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkFailure {
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("disallowed by robots.txt: {0}")]
    RobotsDenied(String),

    #[error("could not parse page: {0}")]
    Parse(String),
}

/// Token counts for one letter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTally {
    /// Tokens extracted from pages, accepted or not
    pub seen: u64,

    /// Rejected tokens by first failing rule
    pub rejected: BTreeMap<Rejection, u64>,
}

impl TokenTally {
    fn record(&mut self, verdict: Verdict) {
        self.seen += 1;
        if let Verdict::Reject(reason) = verdict {
            *self.rejected.entry(reason).or_insert(0) += 1;
        }
    }

    /// Total rejected tokens
    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }

    /// Folds another tally into this one
    pub fn merge(&mut self, other: &TokenTally) {
        self.seen += other.seen;
        for (reason, count) in &other.rejected {
            *self.rejected.entry(*reason).or_insert(0) += count;
        }
    }
}

/// How a letter's walk ended
///
/// A failed walk keeps the words gathered before the failure, so callers
/// can tell "no more pages" apart from "stopped by an error".
#[derive(Debug, Clone)]
pub enum LetterOutcome {
    /// Ran out of next-page links (or hit the page cap)
    Completed {
        letter: char,
        words: Vec<String>,
        pages: u32,
        tally: TokenTally,
    },

    /// A page could not be fetched or parsed
    Failed {
        letter: char,
        words: Vec<String>,
        /// Pages successfully processed before the failure
        pages: u32,
        /// The page number that failed
        page: u32,
        reason: WalkFailure,
        tally: TokenTally,
    },
}

impl LetterOutcome {
    pub fn letter(&self) -> char {
        match self {
            LetterOutcome::Completed { letter, .. } | LetterOutcome::Failed { letter, .. } => {
                *letter
            }
        }
    }

    pub fn words(&self) -> &[String] {
        match self {
            LetterOutcome::Completed { words, .. } | LetterOutcome::Failed { words, .. } => words,
        }
    }

    pub fn pages(&self) -> u32 {
        match self {
            LetterOutcome::Completed { pages, .. } | LetterOutcome::Failed { pages, .. } => *pages,
        }
    }

    pub fn tally(&self) -> &TokenTally {
        match self {
            LetterOutcome::Completed { tally, .. } | LetterOutcome::Failed { tally, .. } => tally,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, LetterOutcome::Completed { .. })
    }

    /// The failing page and reason, if the walk failed
    pub fn failure(&self) -> Option<(u32, &WalkFailure)> {
        match self {
            LetterOutcome::Completed { .. } => None,
            LetterOutcome::Failed { page, reason, .. } => Some((*page, reason)),
        }
    }
}

/// Everything needed to walk browse pages on one site
pub struct Walker {
    client: Client,
    base_url: Url,
    browse_path: String,
    entries_selector: String,
    user_agent: String,
    robots: Option<ParsedRobots>,
    request_delay: Duration,
    max_pages: Option<u32>,
    max_retries: u32,
    retry_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Walker {
    /// Creates a walker around an existing client, without robots.txt rules
    pub fn new(client: Client, config: &Config) -> Result<Self, HoardError> {
        Ok(Self {
            client,
            base_url: Url::parse(&config.site.base_url)?,
            browse_path: config.site.browse_path.clone(),
            entries_selector: config.site.entries_selector.clone(),
            user_agent: config.user_agent.crawler_name.clone(),
            robots: None,
            request_delay: Duration::from_millis(config.harvest.request_delay_ms),
            max_pages: config.harvest.max_pages_per_letter,
            max_retries: config.http.max_retries,
            retry_delay: Duration::from_millis(config.http.retry_delay_ms),
            last_request: Mutex::new(None),
        })
    }

    /// Builds the HTTP client and, if enabled, loads the site's robots.txt
    pub async fn connect(config: &Config) -> Result<Self, HoardError> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        let mut walker = Self::new(client, config)?;

        if config.harvest.respect_robots {
            let robots = fetch_robots(&walker.client, &walker.base_url).await;

            // Crawl-delay can only slow the walk down
            if let Some(seconds) = robots.crawl_delay(&walker.user_agent) {
                let delay = Duration::from_secs_f64(seconds.max(0.0));
                if delay > walker.request_delay {
                    tracing::info!("Using robots.txt crawl-delay of {:?}", delay);
                    walker.request_delay = delay;
                }
            }

            walker = walker.with_robots(robots);
        }

        Ok(walker)
    }

    /// Applies robots.txt rules to every browse URL
    pub fn with_robots(mut self, robots: ParsedRobots) -> Self {
        self.robots = Some(robots);
        self
    }

    /// Absolute URL of a browse page
    pub fn page_url(&self, letter: char, page: u32) -> Result<Url, url::ParseError> {
        self.base_url
            .join(&browse_path(&self.browse_path, letter, page))
    }

    /// Waits until `request_delay` has passed since the previous request
    async fn pace(&self) {
        let wait = {
            let mut last = self
                .last_request
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Instant::now();
            let wait = last
                .map(|prev| self.request_delay.saturating_sub(now.duration_since(prev)))
                .unwrap_or(Duration::ZERO);
            *last = Some(now + wait);
            wait
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    fn is_allowed(&self, url: &Url) -> bool {
        self.robots
            .as_ref()
            .map_or(true, |robots| robots.is_allowed(url.path(), &self.user_agent))
    }
}

/// Path of a browse page
///
/// Page 1 is `<root>/<letter>`; later pages are `<root>/<letter>/<page>`.
pub fn browse_path(root: &str, letter: char, page: u32) -> String {
    let root = root.trim_end_matches('/');
    if page <= 1 {
        format!("{}/{}", root, letter)
    } else {
        format!("{}/{}/{}", root, letter, page)
    }
}

/// Finds the link whose path is exactly `expected_path`
///
/// Hrefs are resolved against `current`; links to other hosts never match.
pub fn find_next_page(current: &Url, links: &[String], expected_path: &str) -> Option<Url> {
    links
        .iter()
        .filter_map(|href| current.join(href.trim()).ok())
        .find(|candidate| {
            candidate.host_str() == current.host_str() && candidate.path() == expected_path
        })
}

/// Walks every browse page of one letter
///
/// Tokens are normalized, classified under `filter`, and kept in page order.
/// The walk ends when a page has no link to the next page number, when the
/// configured page cap is reached, or when a page fails.
pub async fn walk_letter(walker: &Walker, letter: char, filter: &FilterConfig) -> LetterOutcome {
    let mut words = Vec::new();
    let mut tally = TokenTally::default();
    let mut page: u32 = 1;

    let fail = |words, tally, page: u32, reason: WalkFailure| {
        tracing::warn!("Letter '{}' stopped at page {}: {}", letter, page, reason);
        LetterOutcome::Failed {
            letter,
            words,
            pages: page - 1,
            page,
            reason,
            tally,
        }
    };

    let mut url = match walker.page_url(letter, page) {
        Ok(url) => url,
        Err(e) => return fail(words, tally, page, WalkFailure::Parse(e.to_string())),
    };

    loop {
        if !walker.is_allowed(&url) {
            return fail(words, tally, page, WalkFailure::RobotsDenied(url.to_string()));
        }

        walker.pace().await;
        tracing::debug!("Fetching {} (letter '{}', page {})", url, letter, page);

        let body = match fetch_with_retry(
            &walker.client,
            url.as_str(),
            walker.max_retries,
            walker.retry_delay,
        )
        .await
        {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                return fail(words, tally, page, WalkFailure::HttpStatus(status_code))
            }
            FetchResult::NetworkError { error } => {
                return fail(words, tally, page, WalkFailure::Network(error))
            }
        };

        let parsed = match parse_browse_page(&body, &walker.entries_selector) {
            Ok(parsed) => parsed,
            Err(e) => return fail(words, tally, page, WalkFailure::Parse(e.to_string())),
        };

        let before = words.len();
        for raw in &parsed.tokens {
            let token = normalize(raw);
            let verdict = classify(&token, filter);
            tally.record(verdict);
            if verdict.is_accept() {
                words.push(token);
            }
        }
        tracing::debug!(
            "Page {} of '{}': {} tokens, {} accepted",
            page,
            letter,
            parsed.tokens.len(),
            words.len() - before
        );

        if walker.max_pages.is_some_and(|max| page >= max) {
            tracing::warn!("Letter '{}' reached the page cap at page {}", letter, page);
            break;
        }

        let expected = browse_path(&walker.browse_path, letter, page + 1);
        match find_next_page(&url, &parsed.links, &expected) {
            Some(next) => {
                url = next;
                page += 1;
            }
            None => break,
        }
    }

    LetterOutcome::Completed {
        letter,
        words,
        pages: page,
        tally,
    }
}
