//! App Configuration
//!
//! Compile-time settings read from the build environment.

use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use taskflow_client::ClientConfig;

pub const DEFAULT_NOTIFICATION_POLL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub log_level: LevelFilter,
    pub notification_poll: Duration,
    /// Google Identity Services client id; no Google button without it
    pub google_client_id: Option<String>,
}

impl AppConfig {
    /// `TASKFLOW_API_URL`, `TASKFLOW_LOG`, `TASKFLOW_NOTIFICATION_POLL_SECS`,
    /// `TASKFLOW_GOOGLE_CLIENT_ID`
    pub fn from_build_env() -> Self {
        let mut config = Self::from_values(
            option_env!("TASKFLOW_API_URL"),
            option_env!("TASKFLOW_LOG"),
            option_env!("TASKFLOW_NOTIFICATION_POLL_SECS"),
        );
        config.google_client_id = option_env!("TASKFLOW_GOOGLE_CLIENT_ID")
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from);
        config
    }

    fn from_values(api_url: Option<&str>, log: Option<&str>, poll_secs: Option<&str>) -> Self {
        let client = api_url
            .filter(|url| !url.trim().is_empty())
            .map(ClientConfig::new)
            .unwrap_or_default();
        let log_level = log
            .and_then(|l| LevelFilter::from_str(l).ok())
            .unwrap_or(default_level());
        let poll = poll_secs
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_NOTIFICATION_POLL_SECS);
        Self {
            client,
            log_level,
            notification_poll: Duration::from_secs(poll),
            google_client_id: None,
        }
    }
}

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
