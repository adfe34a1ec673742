use crate::client::{RateLimiter, RedditClient, RedditClientError};
use crate::models::{BatchError, SearchAllResult, SearchParams, Sort, TimeRange};
use crate::operations::required;
use crate::operations::search::search_subreddit;
use log::{info, warn};

pub const DEFAULT_LIMIT: u32 = 10;

/// Configuration options for searching every research subreddit
#[derive(Debug, Clone, Default)]
pub struct SearchAllOptions {
    pub query: Option<String>,
    pub sort: Sort,
    pub time: TimeRange,
    pub limit: Option<u32>,
}

/// Operation that runs one search per configured subreddit, in order,
/// rate limited between requests. A failing subreddit is recorded and the
/// batch carries on.
pub struct SearchAllOperation {
    options: SearchAllOptions,
    client: RedditClient,
}

impl SearchAllOperation {
    pub fn new(options: SearchAllOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<SearchAllResult, RedditClientError> {
        let query = required(&self.options.query).ok_or_else(|| {
            RedditClientError::ValidationError("Missing required --query".to_string())
        })?;

        let subreddits = &self.client.config().search_all_subreddits;
        let limit = self.options.limit.unwrap_or(DEFAULT_LIMIT);
        let mut limiter = RateLimiter::from_config(self.client.config());
        let mut posts = Vec::new();
        let mut errors = Vec::new();

        info!(
            "Searching {} subreddits for \"{}\"",
            subreddits.len(),
            query
        );

        for subreddit in subreddits {
            limiter.wait().await;

            let params = SearchParams {
                subreddit: subreddit.clone(),
                query: query.to_string(),
                sort: self.options.sort,
                time: self.options.time,
                limit,
            };

            match search_subreddit(&self.client, &params).await {
                Ok(result) => {
                    info!("r/{}: {} posts", subreddit, result.count);
                    posts.extend(result.posts);
                }
                Err(err) => {
                    warn!("r/{} failed: {}", subreddit, err);
                    errors.push(BatchError {
                        subreddit: subreddit.clone(),
                        query: None,
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            "Search complete: {} posts, {} failed subreddits",
            posts.len(),
            errors.len()
        );

        Ok(SearchAllResult::new(
            query.to_string(),
            subreddits.len(),
            posts,
            errors,
        ))
    }
}
