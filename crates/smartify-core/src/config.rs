use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (smartify.toml + SMARTIFY_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SmartifyConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramConfig {
    /// Bot API token. The only mandatory setting — startup fails without it.
    #[serde(default)]
    pub bot_token: String,
    /// Broadcast destination for the daily channel post. Either a numeric
    /// chat ID or a public "@username". Unset means no channel posting.
    pub channel_id: Option<String>,
}

/// When the daily digest fires, in the configured local timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_hour")]
    pub hour: u8,
    #[serde(default)]
    pub minute: u8,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            hour: default_hour(),
            minute: 0,
        }
    }
}

impl DigestConfig {
    /// Parse the configured IANA zone name, falling back to the default
    /// zone with a warning when the name is invalid.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(
                timezone = %self.timezone,
                "invalid digest timezone in config; falling back to Australia/Melbourne"
            );
            chrono_tz::Australia::Melbourne
        })
    }

    /// Human-readable delivery time, e.g. "09:00 Australia/Melbourne".
    /// Shown in the subscribe keyboard footer and /prefs output.
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02} {}", self.hour, self.minute, self.timezone)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Jobs API root; the country segment and page number are appended.
    #[serde(default = "default_jobs_base_url")]
    pub jobs_base_url: String,
    #[serde(default)]
    pub jobs_app_id: String,
    #[serde(default)]
    pub jobs_app_key: String,
    /// How many listings to request per search.
    #[serde(default = "default_results_per_page")]
    pub jobs_results_per_page: u8,
    /// AI-tools feed endpoint. Empty means the AI-tools section is disabled.
    #[serde(default)]
    pub tools_base_url: String,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            jobs_base_url: default_jobs_base_url(),
            jobs_app_id: String::new(),
            jobs_app_key: String::new(),
            jobs_results_per_page: default_results_per_page(),
            tools_base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_timezone() -> String {
    "Australia/Melbourne".to_string()
}
fn default_hour() -> u8 {
    9
}
fn default_jobs_base_url() -> String {
    "https://api.adzuna.com/v1/api/jobs".to_string()
}
fn default_results_per_page() -> u8 {
    5
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.smartify/smartify.db", home)
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.smartify/smartify.toml", home)
}

impl SmartifyConfig {
    /// Load config from a TOML file with SMARTIFY_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.smartify/smartify.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: SmartifyConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("SMARTIFY_").split("__"))
            .extract()
            .map_err(|e| crate::error::SmartifyError::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = SmartifyConfig::default();
        assert!(config.telegram.bot_token.is_empty());
        assert_eq!(config.digest.hour, 9);
        assert_eq!(config.digest.minute, 0);
        assert_eq!(config.digest.timezone, "Australia/Melbourne");
        assert!(config.telegram.channel_id.is_none());
    }

    #[test]
    fn time_label_is_zero_padded() {
        let digest = DigestConfig {
            timezone: "Asia/Kolkata".into(),
            hour: 7,
            minute: 5,
        };
        assert_eq!(digest.time_label(), "07:05 Asia/Kolkata");
    }

    #[test]
    fn invalid_timezone_falls_back() {
        let digest = DigestConfig {
            timezone: "Not/AZone".into(),
            ..DigestConfig::default()
        };
        assert_eq!(digest.tz(), chrono_tz::Australia::Melbourne);
    }

    #[test]
    fn valid_timezone_parses() {
        let digest = DigestConfig {
            timezone: "Asia/Kolkata".into(),
            ..DigestConfig::default()
        };
        assert_eq!(digest.tz(), chrono_tz::Asia::Kolkata);
    }
}
