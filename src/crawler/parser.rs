//! Browse page parser
//!
//! Pulls two things out of a dictionary browse page:
//! - Raw entry tokens from the blocks matching the entries selector
//! - Every anchor href, for next-page discovery

use crate::HoardError;
use scraper::{Html, Selector};

/// Extracted content of one browse page
#[derive(Debug, Clone, Default)]
pub struct BrowsePage {
    /// Trimmed, non-blank entry lines in document order
    pub tokens: Vec<String>,

    /// Raw `href` values of all anchors, in document order
    pub links: Vec<String>,
}

/// Parses a browse page
///
/// Each element matching `entries_selector` contributes its text split on
/// line breaks. Lines are trimmed and blank lines dropped. Tokens are not
/// normalized or classified here.
///
/// # Example
///
/// ```
/// use wordhoard::crawler::parse_browse_page;
///
/// let html = r#"<div class="entries"><a href="/d/apple">apple</a>
/// <a href="/d/apricot">apricot</a></div><a href="/browse/a/2">next</a>"#;
/// let page = parse_browse_page(html, ".entries").unwrap();
/// assert_eq!(page.tokens, vec!["apple", "apricot"]);
/// assert_eq!(page.links.len(), 3);
/// ```
pub fn parse_browse_page(html: &str, entries_selector: &str) -> Result<BrowsePage, HoardError> {
    let entries = parse_selector(entries_selector)?;
    let anchors = parse_selector("a[href]")?;

    let document = Html::parse_document(html);

    let tokens = document
        .select(&entries)
        .flat_map(|element| {
            let text: String = element.text().collect();
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    let links = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    Ok(BrowsePage { tokens, links })
}

fn parse_selector(selector: &str) -> Result<Selector, HoardError> {
    Selector::parse(selector).map_err(|e| HoardError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
