//! Lexical shape predicates
//!
//! Each predicate answers one structural question about a token. They are
//! independent of any filter settings; `classify` decides which of them
//! matter for a given [`FilterConfig`](super::FilterConfig).

/// Returns true if the token contains a decimal digit
pub fn has_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

/// Returns true if the token contains anything outside 7-bit ASCII
pub fn has_non_ascii(token: &str) -> bool {
    !token.is_ascii()
}

/// Hyphen somewhere inside the token, but not at either end
///
/// `"mother-in-law"` is hyphenated; `"pre-"` and `"-ing"` are not.
pub fn is_hyphenated(token: &str) -> bool {
    token.contains('-') && !token.starts_with('-') && !token.ends_with('-')
}

/// First letter uppercase, every later letter lowercase
///
/// Non-letters are ignored, so `"O'Hare"` fails (the `H`) while
/// `"St. Louis"` fails too (the `L`). A token with no letters is not proper.
pub fn is_proper(token: &str) -> bool {
    let mut letters = token.chars().filter(|c| c.is_alphabetic());

    match letters.next() {
        Some(first) if first.is_uppercase() => letters.all(|c| c.is_lowercase()),
        _ => false,
    }
}

/// Contains a space
pub fn is_phrase(token: &str) -> bool {
    token.contains(' ')
}

/// Ends with a hyphen, e.g. `"pre-"`
pub fn is_prefix(token: &str) -> bool {
    token.ends_with('-')
}

/// Starts with a hyphen, e.g. `"-ing"`
pub fn is_suffix(token: &str) -> bool {
    token.starts_with('-')
}

/// Matches either acronym shape
///
/// See [`is_dotted_acronym`] and [`is_uppercase_acronym`]. Both shapes hold
/// vacuously for the empty string, so `""` counts as an acronym.
pub fn is_acronym(token: &str) -> bool {
    is_dotted_acronym(token) || is_uppercase_acronym(token)
}

/// Letter-period pairs all the way through: `"a.m."`, `"a.b.c."`
///
/// Every even index holds a letter and is immediately followed by a `.`,
/// so the token length is always even.
pub fn is_dotted_acronym(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();

    chars.len() % 2 == 0
        && chars
            .chunks(2)
            .all(|pair| pair[0].is_alphabetic() && pair[1] == '.')
}

/// Uppercase letters with `.`, `/`, `&` punctuation
///
/// A trailing `s` and an apostrophe right before the last character are
/// also allowed, covering possessive and plural forms like `"U.S.A.'s"`
/// and `"CDs"`.
pub fn is_uppercase_acronym(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();

    chars.iter().enumerate().all(|(i, &c)| {
        (c.is_alphabetic() && c.is_uppercase())
            || matches!(c, '.' | '/' | '&')
            || (i + 1 == len && c == 's')
            || (i + 2 == len && c == '\'')
    })
}
