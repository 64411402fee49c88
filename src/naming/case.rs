//! Camel-case ⇄ separator-case conversion for route segments.

use serde::{Deserialize, Serialize};

/// How runs of consecutive uppercase letters are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcronymStyle {
    /// Every uppercase letter after the first word character starts a new word:
    /// `HTTPServer` → `h_t_t_p_server`.
    #[default]
    PerLetter,
    /// An uppercase run is one word; the last capital of the run starts the next
    /// word when a lowercase letter follows: `HTTPServer` → `http_server`.
    Grouped,
}

/// Convert `GetUserInfo` into `get_user_info` (or `get-user-info` with `-`).
pub fn to_separator_case(s: &str, sep: char) -> String {
    to_separator_case_with(s, sep, AcronymStyle::PerLetter)
}

/// Same as [`to_separator_case`] with an explicit acronym style.
pub fn to_separator_case_with(s: &str, sep: char, style: AcronymStyle) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() * 2);
    let mut seen_word = false;

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && seen_word && starts_word(&chars, i, style) {
            out.push(sep);
        }

        if c != sep {
            seen_word = true;
        }

        out.push(c);
    }

    out.to_lowercase()
}

fn starts_word(chars: &[char], i: usize, style: AcronymStyle) -> bool {
    match style {
        AcronymStyle::PerLetter => true,
        AcronymStyle::Grouped => {
            let prev_upper = chars[i - 1].is_ascii_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            !prev_upper || next_lower
        }
    }
}

/// Convert `get_user_info` back into `GetUserInfo`.
///
/// A separator is only consumed when it follows a letter and precedes a
/// lowercase letter; any other separator (including a leading one) is kept.
pub fn to_camel_case(s: &str, sep: char) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    let mut started = false;

    for (i, &c) in chars.iter().enumerate() {
        let mut c = c;
        if !started && c.is_ascii_uppercase() {
            started = true;
        }

        if c.is_ascii_lowercase() && (upper_next || !started) {
            c = c.to_ascii_uppercase();
            upper_next = false;
            started = true;
        }

        let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if started && c == sep && next_lower {
            upper_next = true;
            continue;
        }

        out.push(c);
    }

    out
}
