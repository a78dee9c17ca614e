//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for browse pages
//! - Retry of transient failures
//! - Error classification

use crate::config::{HttpConfig, UserAgentConfig};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with something other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchResult::Success { .. } => false,
            FetchResult::HttpError { status_code } => *status_code >= 500,
            FetchResult::NetworkError { .. } => true,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use wordhoard::config::{HttpConfig, UserAgentConfig};
/// use wordhoard::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success |
/// | Any other status | HttpError |
/// | Timeout / connect / body read failure | NetworkError |
pub async fn fetch_page(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Fetches a URL, retrying transient failures
///
/// Network errors and 5xx responses are retried up to `max_retries` times
/// with `delay` between attempts. Other statuses are returned immediately.
pub async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_retries: u32,
    delay: Duration,
) -> FetchResult {
    let mut attempt = 0;

    loop {
        let result = fetch_page(client, url).await;

        if !result.is_transient() || attempt >= max_retries {
            return result;
        }

        attempt += 1;
        tracing::warn!(
            "Fetch of {} failed ({:?}), retry {}/{} in {:?}",
            url,
            result,
            attempt,
            max_retries,
            delay
        );
        tokio::time::sleep(delay).await;
    }
}
