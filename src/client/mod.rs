use crate::config::AppConfig;
use crate::models::listing::{CommentsResponse, Listing, RawPost};
use crate::models::SearchParams;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use url::Url;

pub mod rate_limiter;
pub mod retry;

pub use rate_limiter::RateLimiter;

// Define a custom error type for handling Reddit API errors
#[derive(Debug)]
pub enum RedditClientError {
    /// A required flag was missing; no request was made
    ValidationError(String),
    RequestError(ReqwestError),
    Timeout(Duration),
    HttpStatus { status: u16, url: String },
    /// Reddit answered with an HTML page (anti-bot interstitial or error page)
    HtmlResponse,
    ParseError(serde_json::Error),
    InvalidUrl(url::ParseError),
    RetriesExhausted {
        attempts: u32,
        last_error: Box<RedditClientError>,
    },
}

impl RedditClientError {
    /// Whether another attempt of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RedditClientError::RequestError(_)
            | RedditClientError::Timeout(_)
            | RedditClientError::HtmlResponse
            | RedditClientError::ParseError(_) => true,
            RedditClientError::HttpStatus { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            RedditClientError::ValidationError(_)
            | RedditClientError::InvalidUrl(_)
            | RedditClientError::RetriesExhausted { .. } => false,
        }
    }
}

impl fmt::Display for RedditClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RedditClientError::ValidationError(msg) => write!(f, "{}", msg),
            RedditClientError::RequestError(err) => write!(f, "Request error: {}", err),
            RedditClientError::Timeout(limit) => {
                write!(f, "Request timed out after {}ms", limit.as_millis())
            }
            RedditClientError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            RedditClientError::HtmlResponse => write!(
                f,
                "Received HTML instead of JSON (likely rate limited or blocked)"
            ),
            RedditClientError::ParseError(err) => write!(f, "Parse error: {}", err),
            RedditClientError::InvalidUrl(err) => write!(f, "Invalid URL: {}", err),
            RedditClientError::RetriesExhausted {
                attempts,
                last_error,
            } => write!(f, "Failed after {} attempts: {}", attempts, last_error),
        }
    }
}

impl std::error::Error for RedditClientError {}

impl From<ReqwestError> for RedditClientError {
    fn from(err: ReqwestError) -> Self {
        RedditClientError::RequestError(err)
    }
}

impl From<serde_json::Error> for RedditClientError {
    fn from(err: serde_json::Error) -> Self {
        RedditClientError::ParseError(err)
    }
}

impl From<url::ParseError> for RedditClientError {
    fn from(err: url::ParseError) -> Self {
        RedditClientError::InvalidUrl(err)
    }
}

/// Client for Reddit's public, unauthenticated `.json` endpoints.
#[derive(Clone)]
pub struct RedditClient {
    client: Client,
    config: AppConfig,
}

impl RedditClient {
    pub fn new() -> Result<Self, RedditClientError> {
        Self::from_config(&AppConfig::default())
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &AppConfig) -> Result<Self, RedditClientError> {
        debug!(
            "Creating RedditClient with user_agent: {} base_url: {}",
            config.user_agent, config.base_url
        );
        Ok(Self {
            client: Self::get_client(&config.user_agent)?,
            config: config.clone(),
        })
    }

    fn get_client(user_agent: &str) -> Result<Client, RedditClientError> {
        Ok(Client::builder().user_agent(user_agent).build()?)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build an absolute URL for `path` under the configured base URL.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, RedditClientError> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET `url` and decode the body as `T`, retrying transient failures
    /// with exponential backoff.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, RedditClientError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = retry::backoff_delay(
                    attempt,
                    self.config.backoff_base,
                    self.config.backoff_jitter,
                );
                debug!("Retry {} for {} in {}ms", attempt, url, delay.as_millis());
                sleep(delay).await;
            }

            match self.fetch_once(url).await {
                Ok(parsed) => return Ok(parsed),
                Err(err) if err.is_retryable() => {
                    warn!(
                        "Attempt {}/{} for {} failed: {}",
                        attempt + 1,
                        max_attempts,
                        url,
                        err
                    );
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(RedditClientError::RetriesExhausted {
            attempts: max_attempts,
            last_error: Box::new(
                last_error.unwrap_or(RedditClientError::Timeout(self.config.request_timeout)),
            ),
        })
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, RedditClientError> {
        debug!("Fetching {}", url);

        let request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");

        // Send and body read share one deadline
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Ok::<_, ReqwestError>((status, String::new()));
            }
            let body = response.text().await?;
            Ok((status, body))
        };

        let (status, body) = match timeout(self.config.request_timeout, exchange).await {
            Ok(result) => result?,
            Err(_) => return Err(RedditClientError::Timeout(self.config.request_timeout)),
        };

        debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(RedditClientError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if retry::looks_like_html(&body) {
            return Err(RedditClientError::HtmlResponse);
        }

        debug!("Response body length: {} bytes", body.len());
        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                debug!(
                    "First 100 chars: {}",
                    body.chars().take(100).collect::<String>()
                );
                Err(RedditClientError::ParseError(e))
            }
        }
    }

    /// `/r/{subreddit}/search.json` with the subreddit percent-encoded as a
    /// single path segment.
    pub fn search_url(&self, params: &SearchParams) -> Result<Url, RedditClientError> {
        let mut url = self.endpoint(
            "/",
            &[
                ("q", params.query.clone()),
                ("restrict_sr", "1".to_string()),
                ("sort", params.sort.as_str().to_string()),
                ("t", params.time.as_str().to_string()),
                ("limit", params.limit.to_string()),
            ],
        )?;
        url.path_segments_mut()
            .map_err(|_| {
                RedditClientError::ValidationError(format!(
                    "Base URL cannot take a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["r", params.subreddit.as_str(), "search.json"]);
        Ok(url)
    }

    /// Search a single subreddit (`restrict_sr=1`)
    pub async fn search_subreddit(
        &self,
        params: &SearchParams,
    ) -> Result<Listing<RawPost>, RedditClientError> {
        let url = self.search_url(params)?;
        self.fetch_json(&url).await
    }

    /// Fetch a post and its comment tree. `path` must already end in `.json`.
    pub async fn fetch_comments(
        &self,
        path: &str,
        limit: u32,
    ) -> Result<CommentsResponse, RedditClientError> {
        let url = self.endpoint(path, &[("limit", limit.to_string())])?;
        self.fetch_json(&url).await
    }
}
