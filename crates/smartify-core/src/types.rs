use serde::{Deserialize, Serialize};

/// Fallback search term used whenever a parsed query ends up with no keyword.
pub const DEFAULT_KEYWORD: &str = "software engineer";

/// Job market selector. Only the two markets the jobs API is configured
/// for are supported; anything else degrades to [`Country::Au`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Au,
    In,
}

impl Country {
    /// Two-letter uppercase market code ("AU" / "IN").
    pub fn code(&self) -> &'static str {
        match self {
            Country::Au => "AU",
            Country::In => "IN",
        }
    }

    /// Lowercase path segment used by the jobs API ("au" / "in").
    pub fn api_segment(&self) -> &'static str {
        match self {
            Country::Au => "au",
            Country::In => "in",
        }
    }

    /// The other supported market. Used by the free-text search fallback
    /// when the first market returns no results.
    pub fn opposite(&self) -> Country {
        match self {
            Country::Au => Country::In,
            Country::In => Country::Au,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "au" => Ok(Country::Au),
            "in" => Ok(Country::In),
            other => Err(format!("unsupported country code: {other}")),
        }
    }
}

/// A normalized job-search query produced by the parser.
///
/// Immutable value type: parsing never fails, malformed input degrades
/// to the defaults instead (keyword = [`DEFAULT_KEYWORD`], country = AU).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Search term. Never empty after parsing.
    pub keyword: String,
    pub country: Country,
    pub location: Option<String>,
}

impl Query {
    /// The fixed query used for daily digest sections and the channel post.
    pub fn daily(country: Country) -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            country,
            location: None,
        }
    }
}
