use crate::client::retry::random_jitter;
use crate::config::AppConfig;
use log::debug;
use std::time::Duration;
use tokio::time::sleep;

/// Spaces out sequential requests in a batch. The first request goes out
/// immediately; every later one waits `delay` plus up to `jitter`.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    delay: Duration,
    jitter: Duration,
    requests: u32,
}

impl RateLimiter {
    pub fn new(delay: Duration, jitter: Duration) -> Self {
        Self {
            delay,
            jitter,
            requests: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.batch_delay, config.batch_jitter)
    }

    /// Wait for the next request slot and return how long was slept.
    pub async fn wait(&mut self) -> Duration {
        let waited = if self.requests == 0 {
            Duration::ZERO
        } else {
            let pause = self.delay + random_jitter(self.jitter);
            if !pause.is_zero() {
                debug!("Rate limiting: waiting {}ms", pause.as_millis());
                sleep(pause).await;
            }
            pause
        };
        self.requests += 1;
        waited
    }
}
