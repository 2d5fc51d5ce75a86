use serde::{Deserialize, Serialize};

/// One job listing, already mapped out of the upstream API shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
}

/// One AI-tool entry from the tools feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub blurb: String,
    pub url: String,
}
