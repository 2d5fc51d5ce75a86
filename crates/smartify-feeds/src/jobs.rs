//! Adzuna-style job search client.
//!
//! Request shape: `GET {base}/{country}/search/1?app_id=..&app_key=..&what=..&where=..`
//! where `{country}` is the lowercase market code.

use std::time::Duration;

use serde::Deserialize;
use smartify_core::config::FeedsConfig;
use smartify_core::types::Query;
use tracing::debug;

use crate::error::{FeedError, Result};
use crate::types::JobPosting;

#[derive(Clone)]
pub struct JobsClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
    results_per_page: u8,
}

impl JobsClient {
    pub fn new(config: &FeedsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: config.jobs_base_url.trim_end_matches('/').to_string(),
            app_id: config.jobs_app_id.clone(),
            app_key: config.jobs_app_key.clone(),
            results_per_page: config.jobs_results_per_page,
        })
    }

    /// Search listings for `query`. An empty result list is normal; errors
    /// are reserved for transport/API failures.
    pub async fn search(&self, query: &Query) -> Result<Vec<JobPosting>> {
        if self.app_id.is_empty() || self.app_key.is_empty() {
            debug!("jobs API credentials not configured; returning no results");
            return Ok(Vec::new());
        }

        let url = format!("{}/{}/search/1", self.base_url, query.country.api_segment());
        let mut request = self.http.get(&url).query(&[
            ("app_id", self.app_id.as_str()),
            ("app_key", self.app_key.as_str()),
            ("what", query.keyword.as_str()),
            ("results_per_page", &self.results_per_page.to_string()),
        ]);
        if let Some(ref location) = query.location {
            request = request.query(&[("where", location.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results.into_iter().map(JobPosting::from).collect())
    }
}

// Upstream DTOs. Everything optional — the API omits fields freely.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ApiJob>,
}

#[derive(Debug, Deserialize)]
struct ApiJob {
    title: Option<String>,
    redirect_url: Option<String>,
    company: Option<ApiCompany>,
    location: Option<ApiLocation>,
}

#[derive(Debug, Deserialize)]
struct ApiCompany {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    display_name: Option<String>,
}

impl From<ApiJob> for JobPosting {
    fn from(job: ApiJob) -> Self {
        JobPosting {
            title: job.title.unwrap_or_else(|| "(untitled)".to_string()),
            company: job
                .company
                .and_then(|c| c.display_name)
                .unwrap_or_default(),
            location: job
                .location
                .and_then(|l| l.display_name)
                .unwrap_or_default(),
            url: job.redirect_url.unwrap_or_default(),
        }
    }
}
