use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Pacing gate for the remote lookup service: two consecutive calls are
/// never admitted less than `interval` apart. The gate is a floor on
/// elapsed time, not a ceiling; slow calls only widen the spacing.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Blocks until the interval since the previously admitted call has
    /// passed, then records this call's admission time. The first call is
    /// admitted immediately.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last {
            sleep_until(last + self.interval).await;
        }
        self.last = Some(Instant::now());
    }
}
