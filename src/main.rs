use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use fare_watcher::{FareWatcher, WatcherConfig};
use log::{LevelFilter, info};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = WatcherConfig::new().context("failed to load watcher config")?;
    let mut watcher = FareWatcher::from_config(config)
        .await
        .context("failed to set up fare watcher")?;
    let summary = watcher
        .start(
            &args.departure_airport,
            &args.arrival_airport,
            &args.start_date,
            &args.stop_date,
        )
        .await
        .context("fare watch stopped")?;

    let prices = watcher.daily_prices();
    if let Some((date, price)) = prices.cheapest() {
        info!("Cheapest day: {} at {}", date, price);
    }
    info!(
        "Done after {} searches, {} days priced",
        summary.pages_fetched,
        prices.len()
    );
    println!("{}", serde_json::to_string_pretty(prices)?);
    Ok(())
}
