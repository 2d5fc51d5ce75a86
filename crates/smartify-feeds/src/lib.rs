//! `smartify-feeds` — clients for the two external content feeds.
//!
//! [`jobs::JobsClient`] talks to an Adzuna-style job search API,
//! [`tools::ToolsClient`] pulls a JSON feed of trending AI tools, and
//! [`format`] renders both into the HTML lists sent to Telegram.
//!
//! "No results" is an empty vec, never an error. Callers treat a
//! [`FeedError`] as "this section is empty today": log and move on.

pub mod error;
pub mod format;
pub mod jobs;
pub mod tools;
pub mod types;

pub use error::{FeedError, Result};
pub use format::{format_jobs, format_tools};
pub use jobs::JobsClient;
pub use tools::ToolsClient;
pub use types::{JobPosting, ToolEntry};
