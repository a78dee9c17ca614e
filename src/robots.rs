//! Robots.txt handling
//!
//! The harvester fetches the site's robots.txt once before walking any
//! letter and checks every browse URL against it.

use reqwest::{Client, StatusCode};
use robotstxt::DefaultMatcher;
use url::Url;

/// Parsed robots.txt rules
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw robots.txt content; empty means allow all
    content: String,
}

impl ParsedRobots {
    /// Wraps raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Rules that allow every path
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks if a path is allowed for the given user agent
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }

    /// Crawl-delay in seconds for `user_agent`
    ///
    /// A group naming the agent wins over the `*` group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut in_rules = false;
        let mut for_agent = None;
        let mut for_wildcard = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // A user-agent line after rules starts a new group
                    if in_rules {
                        group.clear();
                        in_rules = false;
                    }
                    group.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    in_rules = true;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                        for_agent = Some(delay);
                    } else if group.iter().any(|ua| ua == "*") {
                        for_wildcard = Some(delay);
                    }
                }
                _ => in_rules = true,
            }
        }

        for_agent.or(for_wildcard)
    }
}

/// Fetches `/robots.txt` from the site root
///
/// Any failure or non-200 answer is treated as "no rules".
pub async fn fetch_robots(client: &Client, base_url: &Url) -> ParsedRobots {
    let robots_url = match base_url.join("/robots.txt") {
        Ok(url) => url,
        Err(_) => return ParsedRobots::allow_all(),
    };

    match client.get(robots_url.as_str()).send().await {
        Ok(response) if response.status() == StatusCode::OK => match response.text().await {
            Ok(body) => {
                tracing::debug!("Loaded robots.txt from {}", robots_url);
                ParsedRobots::from_content(&body)
            }
            Err(e) => {
                tracing::debug!("Could not read robots.txt body: {}", e);
                ParsedRobots::allow_all()
            }
        },
        Ok(response) => {
            tracing::debug!(
                "No robots.txt at {} (status {}), allowing all",
                robots_url,
                response.status()
            );
            ParsedRobots::allow_all()
        }
        Err(e) => {
            tracing::debug!("Failed to fetch robots.txt: {}, allowing all", e);
            ParsedRobots::allow_all()
        }
    }
}
