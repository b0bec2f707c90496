use rand::{Rng, seq::IndexedRandom};

use crate::{
    config::WatcherConfig, error::WatchResult, markup::FareMarkup, requests::HttpTransport,
};

/// Scrapes the most common user agents, keeping the first
/// `user_agent_limit` of them.
pub async fn fetch_common_user_agents(
    transport: &dyn HttpTransport,
    markup: &dyn FareMarkup,
    config: &WatcherConfig,
) -> WatchResult<Vec<String>> {
    let url = &config.user_agents_url;
    log::info!("Fetching common user agents from {}", url);
    let body = transport.get(url, None).await?.into_success_body()?;
    let user_agents = markup.user_agents(&body, config.user_agent_limit)?;
    log::info!("Found {} user agents", user_agents.len());
    Ok(user_agents)
}

#[derive(Debug, Clone, Default)]
pub struct UserAgentPool {
    user_agents: Vec<String>,
}

impl UserAgentPool {
    pub fn new(user_agents: Vec<String>) -> Self {
        if user_agents.is_empty() {
            log::warn!("User agent pool is empty; requests will use the client default");
        }
        Self { user_agents }
    }

    pub fn choose(&self, rng: &mut impl Rng) -> Option<&str> {
        self.user_agents.choose(rng).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.user_agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_agents.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.user_agents
    }
}
