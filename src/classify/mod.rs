//! Word classification
//!
//! Decides whether a scraped token qualifies as a plain dictionary word.
//! Tokens with digits or non-ASCII characters are always rejected; the
//! remaining shape categories are rejected unless the matching
//! [`FilterConfig`] flag opts them in.
//!
//! # Example
//!
//! ```
//! use wordhoard::classify::{should_include, FilterConfig};
//!
//! let strict = FilterConfig::default();
//! assert!(should_include("apple", &strict));
//! assert!(!should_include("mother-in-law", &strict));
//!
//! let lenient = FilterConfig { include_hyphenated: true, ..strict };
//! assert!(should_include("mother-in-law", &lenient));
//! ```

pub mod shape;

use serde::Deserialize;
use std::fmt;

/// Modifier letter reversed comma, as it appears in some entries
const MODIFIER_APOSTROPHE: char = '\u{02BD}';

/// Which lexical shapes are kept
///
/// Every flag defaults to `false`: the shape is excluded unless opted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Keep tokens with an inner hyphen (`mother-in-law`)
    pub include_hyphenated: bool,
    /// Keep capitalized tokens (`Paris`)
    pub include_proper: bool,
    /// Keep tokens containing a space (`hello world`)
    pub include_phrases: bool,
    /// Keep tokens ending in a hyphen (`pre-`)
    pub include_prefixes: bool,
    /// Keep tokens starting with a hyphen (`-ing`)
    pub include_suffixes: bool,
    /// Keep acronym-shaped tokens (`U.S.A.`, `a.m.`)
    pub include_acronyms: bool,
}

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    Digit,
    NonAscii,
    Hyphenated,
    Proper,
    Phrase,
    Prefix,
    Suffix,
    Acronym,
}

impl Rejection {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::Digit => "contains digit",
            Rejection::NonAscii => "non-ASCII",
            Rejection::Hyphenated => "hyphenated",
            Rejection::Proper => "proper noun",
            Rejection::Phrase => "phrase",
            Rejection::Prefix => "prefix",
            Rejection::Suffix => "suffix",
            Rejection::Acronym => "acronym",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying one token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Replaces the modifier-letter apostrophe with a plain `'`
///
/// Downstream consumers of the word list may only handle ASCII. Every
/// occurrence is replaced, not just the first.
pub fn normalize(token: &str) -> String {
    token.replace(MODIFIER_APOSTROPHE, "'")
}

/// Classifies a token, reporting the first rule that rejects it
///
/// Rules are checked in a fixed order: digit, non-ASCII, hyphenated,
/// proper, phrase, prefix, suffix, acronym. The first two reject
/// unconditionally; the rest only when their flag is off.
pub fn classify(token: &str, config: &FilterConfig) -> Verdict {
    if shape::has_digit(token) {
        return Verdict::Reject(Rejection::Digit);
    }
    if shape::has_non_ascii(token) {
        return Verdict::Reject(Rejection::NonAscii);
    }

    let gated: [(bool, fn(&str) -> bool, Rejection); 6] = [
        (config.include_hyphenated, shape::is_hyphenated, Rejection::Hyphenated),
        (config.include_proper, shape::is_proper, Rejection::Proper),
        (config.include_phrases, shape::is_phrase, Rejection::Phrase),
        (config.include_prefixes, shape::is_prefix, Rejection::Prefix),
        (config.include_suffixes, shape::is_suffix, Rejection::Suffix),
        (config.include_acronyms, shape::is_acronym, Rejection::Acronym),
    ];

    for (included, matches, reason) in gated {
        if !included && matches(token) {
            return Verdict::Reject(reason);
        }
    }

    Verdict::Accept
}

/// Returns true if the token should be kept under `config`
pub fn should_include(token: &str, config: &FilterConfig) -> bool {
    classify(token, config).is_accept()
}
