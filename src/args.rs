use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "fare_watcher")]
#[command(about = "Samples round-trip fares weekly across a date window")]
#[command(version)]
pub struct Args {
    /// Departure airport code (e.g. SFO)
    pub departure_airport: String,

    /// Arrival airport code (e.g. JFK)
    pub arrival_airport: String,

    /// First day of the window, year first (e.g. 2024-06-01)
    pub start_date: String,

    /// Day the window ends, exclusive
    pub stop_date: String,
}
