use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::WatcherConfig,
    error::WatchResult,
    markup::{CssMarkup, FareMarkup},
    pacing::{Pacer, TokioPacer, jittered_pause},
    prices::DailyPrices,
    requests::{HttpTransport, RequestClient},
    user_agents::{UserAgentPool, fetch_common_user_agents},
    window::FareQuery,
};

/// What one call to [`FareWatcher::watch`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub pages_fetched: usize,
    pub fares_recorded: usize,
}

/// Polls the flexible fare calendar once a week across a window and keeps
/// every daily price it sees.
pub struct FareWatcher {
    config: WatcherConfig,
    transport: Box<dyn HttpTransport>,
    markup: Box<dyn FareMarkup>,
    pacer: Box<dyn Pacer>,
    user_agents: UserAgentPool,
    daily_prices: DailyPrices,
    rng: StdRng,
}

impl FareWatcher {
    /// Fetches the user-agent pool up front, so a blocked or broken
    /// user-agent page fails construction.
    pub async fn new(
        config: WatcherConfig,
        transport: Box<dyn HttpTransport>,
        markup: Box<dyn FareMarkup>,
        pacer: Box<dyn Pacer>,
    ) -> WatchResult<Self> {
        let user_agents =
            fetch_common_user_agents(transport.as_ref(), markup.as_ref(), &config).await?;
        Ok(Self {
            config,
            transport,
            markup,
            pacer,
            user_agents: UserAgentPool::new(user_agents),
            daily_prices: DailyPrices::new(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Live setup: reqwest, CSS selectors from the config and real sleeps.
    pub async fn from_config(config: WatcherConfig) -> WatchResult<Self> {
        let transport = RequestClient::new(config.request_timeout())?;
        let markup = CssMarkup::new(&config)?;
        Self::new(config, Box::new(transport), Box::new(markup), Box::new(TokioPacer)).await
    }

    /// Makes user-agent picks and pauses reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Parses raw CLI-style arguments and watches that route.
    pub async fn start(
        &mut self,
        departure_airport: &str,
        arrival_airport: &str,
        start_date: &str,
        stop_date: &str,
    ) -> WatchResult<WatchSummary> {
        let query = FareQuery::parse(departure_airport, arrival_airport, start_date, stop_date)?;
        self.watch(&query).await
    }

    pub async fn watch(&mut self, query: &FareQuery) -> WatchResult<WatchSummary> {
        let mut summary = WatchSummary::default();
        let mut search_dates = query.window.search_dates().peekable();

        while let Some(search_date) = search_dates.next() {
            let url = self.config.get_fare_url(
                &query.departure_airport,
                &query.arrival_airport,
                search_date,
            );
            let user_agent = self.user_agents.choose(&mut self.rng);
            log::info!("Searching fares around {} at {}", search_date, url);
            log::debug!("Using user agent {:?}", user_agent);

            let body = self.transport.get(&url, user_agent).await?.into_success_body()?;
            let fares = self.markup.daily_fares(&body)?;
            if fares.is_empty() {
                log::warn!("No fares found on {}", url);
            }
            summary.pages_fetched += 1;
            summary.fares_recorded += self.daily_prices.record_all(fares);

            if search_dates.peek().is_some() {
                let pause = jittered_pause(&mut self.rng, self.config.max_pause_secs);
                log::info!("Sleeping {}s before the next search", pause.as_secs());
                self.pacer.pause(pause).await;
            }
        }

        log::info!(
            "Fetched {} pages, recorded {} fares ({} distinct days)",
            summary.pages_fetched,
            summary.fares_recorded,
            self.daily_prices.len()
        );
        Ok(summary)
    }

    pub fn daily_prices(&self) -> &DailyPrices {
        &self.daily_prices
    }

    pub fn user_agents(&self) -> &UserAgentPool {
        &self.user_agents
    }
}
