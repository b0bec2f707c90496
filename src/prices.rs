use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::markup::DailyFare;

/// Cheapest fare seen per day, in whole currency units.
///
/// Entries live as long as the watcher. Recording a day twice keeps the
/// later price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyPrices {
    prices: BTreeMap<NaiveDate, u32>,
}

impl DailyPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the price that was overwritten, if any.
    pub fn record(&mut self, date: NaiveDate, price: u32) -> Option<u32> {
        self.prices.insert(date, price)
    }

    pub fn record_all(&mut self, fares: impl IntoIterator<Item = DailyFare>) -> usize {
        let mut recorded = 0;
        for fare in fares {
            self.record(fare.date, fare.price);
            recorded += 1;
        }
        recorded
    }

    pub fn get(&self, date: NaiveDate) -> Option<u32> {
        self.prices.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.prices.iter().map(|(date, price)| (*date, *price))
    }

    /// The cheapest day so far; ties go to the earliest date.
    pub fn cheapest(&self) -> Option<(NaiveDate, u32)> {
        self.iter().min_by_key(|(_, price)| *price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn later_price_overwrites() {
        let mut prices = DailyPrices::new();
        assert_eq!(prices.record(ymd(2024, 6, 10), 500), None);
        assert_eq!(prices.record(ymd(2024, 6, 10), 450), Some(500));
        assert_eq!(prices.len(), 1);
        assert_eq!(prices.get(ymd(2024, 6, 10)), Some(450));
    }

    #[test]
    fn record_all_counts_overwrites_too() {
        let mut prices = DailyPrices::new();
        let fares = [
            DailyFare { date: ymd(2024, 6, 10), price: 300 },
            DailyFare { date: ymd(2024, 6, 11), price: 280 },
            DailyFare { date: ymd(2024, 6, 10), price: 310 },
        ];
        assert_eq!(prices.record_all(fares), 3);
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.cheapest(), Some((ymd(2024, 6, 11), 280)));
    }

    #[test]
    fn serializes_as_date_keyed_object() {
        let mut prices = DailyPrices::new();
        prices.record(ymd(2024, 6, 11), 280);
        prices.record(ymd(2024, 6, 10), 300);
        assert_eq!(
            serde_json::to_string(&prices).unwrap(),
            r#"{"2024-06-10":300,"2024-06-11":280}"#
        );
    }
}
