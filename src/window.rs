use chrono::{Days, NaiveDate};

use crate::{error::WatchResult, text_manipulators::parse_flexible_date};

/// The flexible calendar page centres on the search date, so the first
/// search sits a few days into the window.
pub const FIRST_SEARCH_OFFSET: Days = Days::new(3);
pub const SEARCH_STRIDE: Days = Days::new(7);

/// The `[start, stop)` range sampled weekly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: NaiveDate,
    pub stop: NaiveDate,
}

impl SearchWindow {
    pub fn new(start: NaiveDate, stop: NaiveDate) -> Self {
        Self { start, stop }
    }

    pub fn parse(start: &str, stop: &str) -> WatchResult<Self> {
        Ok(Self::new(parse_flexible_date(start)?, parse_flexible_date(stop)?))
    }

    pub fn first_search_date(&self) -> NaiveDate {
        self.start
            .checked_add_days(FIRST_SEARCH_OFFSET)
            .unwrap_or(NaiveDate::MAX)
    }

    /// Every date a search page is requested for, in order.
    pub fn search_dates(&self) -> SearchDates {
        SearchDates {
            next: Some(self.first_search_date()),
            stop: self.stop,
        }
    }
}

pub struct SearchDates {
    next: Option<NaiveDate>,
    stop: NaiveDate,
}

impl Iterator for SearchDates {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|date| *date < self.stop)?;
        self.next = current.checked_add_days(SEARCH_STRIDE);
        Some(current)
    }
}

/// A normalized route plus the window to watch it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareQuery {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub window: SearchWindow,
}

impl FareQuery {
    pub fn parse(
        departure_airport: &str,
        arrival_airport: &str,
        start_date: &str,
        stop_date: &str,
    ) -> WatchResult<Self> {
        Ok(Self {
            departure_airport: normalize_airport(departure_airport),
            arrival_airport: normalize_airport(arrival_airport),
            window: SearchWindow::parse(start_date, stop_date)?,
        })
    }
}

fn normalize_airport(code: &str) -> String {
    code.trim().to_uppercase()
}
