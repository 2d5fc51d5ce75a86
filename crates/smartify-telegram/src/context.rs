//! Shared state handed to every handler through the teloxide dependency map.

use smartify_core::config::SmartifyConfig;
use smartify_digest::FeedDigestSource;
use smartify_feeds::{JobsClient, ToolsClient};
use smartify_prefs::{PrefStore, UserLocks};

pub struct AppContext {
    pub config: SmartifyConfig,
    pub store: PrefStore,
    pub locks: UserLocks,
    pub jobs: JobsClient,
    pub tools: ToolsClient,
    pub digest: FeedDigestSource,
}

impl AppContext {
    pub fn new(
        config: SmartifyConfig,
        store: PrefStore,
        jobs: JobsClient,
        tools: ToolsClient,
    ) -> Self {
        let digest = FeedDigestSource::new(jobs.clone(), tools.clone());
        Self {
            config,
            store,
            locks: UserLocks::new(),
            jobs,
            tools,
            digest,
        }
    }

    /// "09:00 Australia/Melbourne" — shown in the keyboard footer and /prefs.
    pub fn daily_label(&self) -> String {
        self.config.digest.time_label()
    }
}
