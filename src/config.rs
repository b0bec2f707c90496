use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::WatchResult;

pub const ENV_PREFIX: &str = "FARE_WATCHER_";

const DEFAULT_FARE_URL_TEMPLATE: &str =
    "https://www.kayak.com/flights/{origin}-{destination}/{date}-flexible";
const DEFAULT_USER_AGENTS_URL: &str =
    "https://techblog.willshouse.com/2012/01/03/most-common-user-agents/";
// Equivalent XPath:
// //div[contains(@class, "keel-grid") and contains(@class, "row") and not(contains(@class, "headerRow"))]
//   /div[contains(@class, "col-cell") and contains(@class, "valid")]/a
const DEFAULT_FARE_SELECTOR: &str = "div.keel-grid.row:not(.headerRow) div.col-cell.valid a";
const DEFAULT_FARE_DATE_ATTRIBUTE: &str = "data-x-filter-code";
const DEFAULT_USER_AGENT_SELECTOR: &str =
    "table.make-html-table.most-common-user-agents td.useragent";

/// Settings for a watch run, read from `FARE_WATCHER_*` env vars.
///
/// Every field has a default, so an empty environment gives the stock
/// kayak / user-agent-list setup.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
    /// Search URL with `{origin}`, `{destination}` and `{date}` placeholders.
    #[serde(default = "default_fare_url_template")]
    pub fare_url_template: String,
    #[serde(default = "default_user_agents_url")]
    pub user_agents_url: String,
    #[serde(default = "default_user_agent_limit")]
    pub user_agent_limit: usize,
    /// Upper bound (exclusive) of the random pause between searches.
    #[serde(default = "default_max_pause_secs")]
    pub max_pause_secs: u64,
    /// No timeout unless set.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_fare_selector")]
    pub fare_selector: String,
    #[serde(default = "default_fare_date_attribute")]
    pub fare_date_attribute: String,
    #[serde(default = "default_user_agent_selector")]
    pub user_agent_selector: String,
}

fn default_fare_url_template() -> String {
    DEFAULT_FARE_URL_TEMPLATE.to_string()
}

fn default_user_agents_url() -> String {
    DEFAULT_USER_AGENTS_URL.to_string()
}

fn default_user_agent_limit() -> usize {
    5
}

fn default_max_pause_secs() -> u64 {
    600
}

fn default_fare_selector() -> String {
    DEFAULT_FARE_SELECTOR.to_string()
}

fn default_fare_date_attribute() -> String {
    DEFAULT_FARE_DATE_ATTRIBUTE.to_string()
}

fn default_user_agent_selector() -> String {
    DEFAULT_USER_AGENT_SELECTOR.to_string()
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            fare_url_template: default_fare_url_template(),
            user_agents_url: default_user_agents_url(),
            user_agent_limit: default_user_agent_limit(),
            max_pause_secs: default_max_pause_secs(),
            request_timeout_secs: None,
            fare_selector: default_fare_selector(),
            fare_date_attribute: default_fare_date_attribute(),
            user_agent_selector: default_user_agent_selector(),
        }
    }
}

impl WatcherConfig {
    pub fn new() -> WatchResult<Self> {
        Self::load_from_env(ENV_PREFIX)
    }

    pub fn get_fare_url(&self, origin: &str, destination: &str, search_date: NaiveDate) -> String {
        self.fare_url_template
            .replace("{origin}", origin)
            .replace("{destination}", destination)
            .replace("{date}", &search_date.format("%Y-%m-%d").to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env(prefix: &str) -> WatchResult<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(prefix).from_env::<Self>()?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
