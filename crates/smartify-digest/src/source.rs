//! Where digest section content comes from.

use async_trait::async_trait;
use smartify_core::types::{Country, Query};
use smartify_feeds::{format_jobs, format_tools, JobsClient, ToolsClient};
use smartify_prefs::ToggleKey;
use tracing::warn;

/// Supplies the formatted body for one digest section.
///
/// Implementations must return an empty string both for "no content today"
/// and for a failed fetch — the assembly layer treats the two identically
/// (skip the section, keep going).
#[async_trait]
pub trait DigestSource: Send + Sync {
    async fn section(&self, key: ToggleKey) -> String;
}

/// Live source backed by the jobs API and the AI-tools feed, always using
/// the fixed daily query (default keyword, no location).
pub struct FeedDigestSource {
    jobs: JobsClient,
    tools: ToolsClient,
}

impl FeedDigestSource {
    pub fn new(jobs: JobsClient, tools: ToolsClient) -> Self {
        Self { jobs, tools }
    }

    async fn jobs_section(&self, country: Country) -> String {
        match self.jobs.search(&Query::daily(country)).await {
            Ok(listings) => format_jobs(&listings),
            Err(e) => {
                warn!(country = %country, error = %e, "digest jobs fetch failed; section skipped");
                String::new()
            }
        }
    }
}

#[async_trait]
impl DigestSource for FeedDigestSource {
    async fn section(&self, key: ToggleKey) -> String {
        match key {
            ToggleKey::JobsAu => self.jobs_section(Country::Au).await,
            ToggleKey::JobsIn => self.jobs_section(Country::In).await,
            ToggleKey::AiTools => match self.tools.list().await {
                Ok(entries) => format_tools(&entries),
                Err(e) => {
                    warn!(error = %e, "digest tools fetch failed; section skipped");
                    String::new()
                }
            },
        }
    }
}
