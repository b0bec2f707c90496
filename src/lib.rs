pub mod config;
pub mod error;
pub mod markup;
pub mod pacing;
pub mod prices;
pub mod requests;
pub mod text_manipulators;
pub mod user_agents;
pub mod watcher;
pub mod window;

pub use config::WatcherConfig;
pub use error::{WatchError, WatchResult};
pub use prices::DailyPrices;
pub use watcher::{FareWatcher, WatchSummary};
pub use window::{FareQuery, SearchWindow};
