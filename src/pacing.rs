use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Waits between searches.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A whole number of seconds in `[0, max_secs)`, so request timing doesn't
/// look scripted. Zero when `max_secs` is zero.
pub fn jittered_pause(rng: &mut impl Rng, max_secs: u64) -> Duration {
    if max_secs == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs(rng.random_range(0..max_secs))
}
