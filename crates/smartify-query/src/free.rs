//! Free-text parsing: "data engineer jobs in India loc=Bangalore" → [`Query`].

use std::sync::OnceLock;

use regex::Regex;
use smartify_core::types::{Country, Query, DEFAULT_KEYWORD};

fn punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\.;:]+").unwrap())
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn au_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(au|australia)\b").unwrap())
}

fn india_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bindia\b").unwrap())
}

// The `loc=` prefix is case-sensitive, unlike the country words.
fn loc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"loc=([A-Za-z\s]+)").unwrap())
}

/// Parse an arbitrary sentence into a [`Query`]. Never fails.
///
/// Steps, in order:
/// 1. Replace runs of `, . ; :` with a space, collapse whitespace, trim.
/// 2. Country detection: the AU rule (`au`/`australia`, whole word,
///    case-insensitive) runs first; the India rule (`india`) runs second.
///    Both always run — when a sentence matches both, the India rule is
///    evaluated last so the final country is IN. Matched words are removed.
/// 3. The first `loc=<letters/spaces>` match becomes the location (trimmed);
///    all such patterns are removed from the text.
/// 4. Whatever text remains, trimmed, is the keyword; empty falls back to
///    [`DEFAULT_KEYWORD`].
pub fn parse_free_text(text: &str) -> Query {
    let mut t = punct_re().replace_all(text.trim(), " ").into_owned();
    t = whitespace_re().replace_all(&t, " ").trim().to_string();

    let mut country = Country::Au;
    if au_re().is_match(&t) {
        country = Country::Au;
        t = au_re().replace_all(&t, "").into_owned();
    }
    if india_re().is_match(&t) {
        country = Country::In;
        t = india_re().replace_all(&t, "").into_owned();
    }

    let mut location = None;
    if let Some(caps) = loc_re().captures(&t) {
        location = Some(caps[1].trim().to_string());
        t = loc_re().replace_all(&t, "").into_owned();
    }

    let keyword = t.trim().to_string();
    Query {
        keyword: if keyword.is_empty() {
            DEFAULT_KEYWORD.to_string()
        } else {
            keyword
        },
        country,
        location,
    }
}
