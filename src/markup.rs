use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::{
    config::WatcherConfig,
    error::{WatchError, WatchResult},
    text_manipulators::{PriceParser, extract_text, parse_flexible_date},
};

/// One day's cheapest fare as shown in the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyFare {
    pub date: NaiveDate,
    pub price: u32,
}

/// Pulls data out of the two pages we scrape.
pub trait FareMarkup: Send + Sync {
    /// At most `limit` user agents, in page order.
    fn user_agents(&self, html: &str, limit: usize) -> WatchResult<Vec<String>>;

    /// Every fare node on a search results page. Fails on the first
    /// malformed node.
    fn daily_fares(&self, html: &str) -> WatchResult<Vec<DailyFare>>;
}

pub struct CssMarkup {
    fare_selector: Selector,
    fare_date_attribute: String,
    user_agent_selector: Selector,
    price_parser: PriceParser,
}

fn parse_selector(selector: &str) -> WatchResult<Selector> {
    Selector::parse(selector).map_err(|e| WatchError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

impl CssMarkup {
    pub fn new(config: &WatcherConfig) -> WatchResult<Self> {
        Ok(Self {
            fare_selector: parse_selector(&config.fare_selector)?,
            fare_date_attribute: config.fare_date_attribute.clone(),
            user_agent_selector: parse_selector(&config.user_agent_selector)?,
            price_parser: PriceParser::new()?,
        })
    }
}

impl FareMarkup for CssMarkup {
    fn user_agents(&self, html: &str, limit: usize) -> WatchResult<Vec<String>> {
        // Many websites have code supporting outdated clients. Often the
        // DOM's implementation is vastly different.
        let document = Html::parse_document(html);
        let user_agents = document
            .select(&self.user_agent_selector)
            .map(extract_text)
            .take(limit)
            .collect();
        Ok(user_agents)
    }

    fn daily_fares(&self, html: &str) -> WatchResult<Vec<DailyFare>> {
        let document = Html::parse_document(html);
        document
            .select(&self.fare_selector)
            .map(|node| -> WatchResult<DailyFare> {
                let raw_date = node.value().attr(&self.fare_date_attribute).ok_or_else(|| {
                    WatchError::MissingAttribute {
                        attribute: self.fare_date_attribute.clone(),
                    }
                })?;
                let date = parse_flexible_date(raw_date)?;
                let price = self.price_parser.parse_price(&extract_text(node))?;
                Ok(DailyFare { date, price })
            })
            .collect()
    }
}
