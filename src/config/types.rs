use crate::classify::FilterConfig;
use crate::crawler::LETTERS;
use serde::Deserialize;

/// Main configuration structure for Wordhoard
///
/// Every table is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub harvest: HarvestConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

/// Where the browse listing lives and how entries are marked up
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Scheme and host of the dictionary site
    pub base_url: String,

    /// Path under which `<letter>` and `<letter>/<page>` are appended
    pub browse_path: String,

    /// CSS selector for the blocks holding entry text
    pub entries_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.merriam-webster.com".to_string(),
            browse_path: "/browse/dictionary".to_string(),
            entries_selector: ".entries".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Wordhoard".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/wordhoard".to_string(),
            contact_email: "wordhoard@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats as `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Extra attempts for network errors and 5xx responses
    pub max_retries: u32,

    /// Pause before each retry (milliseconds)
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 0,
            retry_delay_ms: 5000,
        }
    }
}

/// Letter walk behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HarvestConfig {
    /// Letters walked, in order
    pub letters: Vec<char>,

    /// Minimum time between consecutive page requests (milliseconds)
    pub request_delay_ms: u64,

    /// Stop a letter after this many pages
    pub max_pages_per_letter: Option<u32>,

    /// Check browse URLs against the site's robots.txt
    pub respect_robots: bool,

    /// Abort the whole harvest on the first failed letter
    pub fail_fast: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            letters: LETTERS.to_vec(),
            request_delay_ms: 250,
            max_pages_per_letter: None,
            respect_robots: true,
            fail_fast: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Word list destination; stdout when unset
    pub words_path: Option<String>,

    /// Markdown run summary destination
    pub summary_path: Option<String>,
}
