use rand::Rng;
use std::time::Duration;

/// Delay before retry number `attempt` (1 for the first retry):
/// `base * 2^attempt` plus up to `jitter` of random noise.
pub fn backoff_delay(attempt: u32, base: Duration, jitter: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    exponential + random_jitter(jitter)
}

/// Uniform random duration in `[0, max)`.
pub fn random_jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
}

/// Reddit serves HTML error and anti-bot pages with a 200 status.
pub fn looks_like_html(body: &str) -> bool {
    body.trim_start().starts_with('<') || body.to_ascii_lowercase().contains("<!doctype")
}
