//! Command-argument parsing for `/jobs keyword... [au|in] [loc=City]`.

use smartify_core::types::{Country, Query, DEFAULT_KEYWORD};

/// Parse an ordered sequence of command tokens into a [`Query`].
///
/// Per token, case-insensitively:
/// - `au` / `in` sets the country (last occurrence wins)
/// - a `loc=` prefix sets the location to everything after the first `=`
///   (last occurrence wins, no trimming)
/// - anything else is appended to the keyword, preserving order
///
/// An empty keyword falls back to [`DEFAULT_KEYWORD`].
pub fn parse_args<'a, I>(tokens: I) -> Query
where
    I: IntoIterator<Item = &'a str>,
{
    let mut country = Country::Au;
    let mut location = None;
    let mut keyword_tokens: Vec<&str> = Vec::new();

    for token in tokens {
        let lower = token.to_ascii_lowercase();
        if let Ok(c) = lower.parse::<Country>() {
            country = c;
        } else if lower.starts_with("loc=") {
            // Take the remainder from the original token so case is preserved.
            location = token.split_once('=').map(|(_, rest)| rest.to_string());
        } else {
            keyword_tokens.push(token);
        }
    }

    let keyword = keyword_tokens.join(" ").trim().to_string();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_example() {
        let q = parse_args(["au", "loc=Sydney", "data", "engineer"]);
        assert_eq!(q.keyword, "data engineer");
        assert_eq!(q.country, Country::Au);
        assert_eq!(q.location.as_deref(), Some("Sydney"));
    }

    #[test]
    fn empty_input_uses_defaults() {
        let q = parse_args([]);
        assert_eq!(q.keyword, DEFAULT_KEYWORD);
        assert_eq!(q.country, Country::Au);
        assert_eq!(q.location, None);
    }

    #[test]
    fn keyword_is_never_empty() {
        for tokens in [vec![], vec!["au"], vec!["in", "loc=Pune"], vec!["AU", "IN"]] {
            let q = parse_args(tokens);
            assert!(!q.keyword.is_empty());
        }
    }

    #[test]
    fn last_country_wins() {
        let q = parse_args(["au", "rust", "in"]);
        assert_eq!(q.country, Country::In);
        assert_eq!(q.keyword, "rust");
    }

    #[test]
    fn country_token_is_case_insensitive() {
        assert_eq!(parse_args(["In"]).country, Country::In);
        assert_eq!(parse_args(["AU"]).country, Country::Au);
    }

    #[test]
    fn last_location_wins_and_keeps_original_case() {
        let q = parse_args(["LOC=Sydney", "loc=Melbourne"]);
        assert_eq!(q.location.as_deref(), Some("Melbourne"));

        let q = parse_args(["LOC=Sydney"]);
        assert_eq!(q.location.as_deref(), Some("Sydney"));
    }

    #[test]
    fn location_value_is_not_trimmed() {
        // Only the first '=' splits; the remainder is taken verbatim.
        let q = parse_args(["loc=New=York"]);
        assert_eq!(q.location.as_deref(), Some("New=York"));
    }

    #[test]
    fn keyword_order_is_preserved() {
        let q = parse_args(["senior", "in", "rust", "developer"]);
        assert_eq!(q.keyword, "senior rust developer");
        assert_eq!(q.country, Country::In);
    }
}
