//! Configuration module for handling environment variables and .env files

use crate::client::RedditClient;
use dotenv::dotenv;
use log::{debug, warn};
use std::env;
use std::time::Duration;

/// Subreddits searched by `search-all`, in order.
pub const SEARCH_ALL_SUBREDDITS: [&str; 8] = [
    "shopify",
    "ShopifyeCommerce",
    "reviewmyshopify",
    "ecommerce",
    "Entrepreneur",
    "smallbusiness",
    "dropship",
    "marketing",
];

/// Subreddits searched by `apps`, in order.
pub const APPS_SUBREDDITS: [&str; 2] = ["shopify", "ecommerce"];

const DEFAULT_USER_AGENT: &str = "reddit-researcher/1.0 (shopify app research tool)";
const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Reddit API settings
    pub user_agent: String,
    pub base_url: String,

    // Fetch-with-retry tuning
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_jitter: Duration,

    // Delay between sequential batch requests
    pub batch_delay: Duration,
    pub batch_jitter: Duration,

    /// Deepest comment nesting level kept when flattening (exclusive)
    pub max_comment_depth: usize,

    pub search_all_subreddits: Vec<String>,
    pub apps_subreddits: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            max_attempts: 3,
            backoff_base: Duration::from_millis(600),
            backoff_jitter: Duration::from_millis(400),
            batch_delay: Duration::from_millis(2000),
            batch_jitter: Duration::from_millis(500),
            max_comment_depth: 2,
            search_all_subreddits: SEARCH_ALL_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            apps_subreddits: APPS_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => debug!("Loaded environment from .env file"),
            Err(_) => debug!("No .env file found, using system environment variables only"),
        }

        let mut config = Self::default();

        if let Ok(user_agent) = env::var("REDDIT_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config.user_agent = user_agent;
            }
        }

        if let Ok(base_url) = env::var("REDDIT_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = parse_var::<u64>("REDDIT_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(attempts) = parse_var::<u32>("REDDIT_MAX_ATTEMPTS") {
            // At least the literal call has to happen
            config.max_attempts = attempts.max(1);
        }

        if let Some(ms) = parse_var::<u64>("REDDIT_BATCH_DELAY_MS") {
            config.batch_delay = Duration::from_millis(ms);
        }

        config
    }

    /// Configuration with every delay zeroed, pointed at `base_url`.
    /// Used to drive the client against a local server.
    pub fn without_delays(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            backoff_base: Duration::ZERO,
            backoff_jitter: Duration::ZERO,
            batch_delay: Duration::ZERO,
            batch_jitter: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Create a RedditClient from this configuration
    pub fn create_client(&self) -> Result<RedditClient, crate::client::RedditClientError> {
        RedditClient::from_config(self)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: could not parse {:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.backoff_base, Duration::from_millis(600));
        assert_eq!(config.batch_delay, Duration::from_millis(2000));
        assert_eq!(config.max_comment_depth, 2);
        assert_eq!(config.search_all_subreddits.len(), 8);
        assert_eq!(config.search_all_subreddits[0], "shopify");
        assert_eq!(config.search_all_subreddits[7], "marketing");
        assert_eq!(config.apps_subreddits, vec!["shopify", "ecommerce"]);
    }

    #[test]
    fn test_without_delays_strips_trailing_slash() {
        let config = AppConfig::without_delays("http://127.0.0.1:1234/");
        assert_eq!(config.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.backoff_base, Duration::ZERO);
        assert_eq!(config.batch_jitter, Duration::ZERO);
        assert_eq!(config.max_attempts, 3);
    }
}
