use crate::client::{RedditClient, RedditClientError};
use crate::models::{Post, SearchParams, SearchResult, Sort, TimeRange};
use crate::operations::required;
use log::info;

pub const DEFAULT_LIMIT: u32 = 25;

/// Configuration options for searching one subreddit
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub subreddit: Option<String>,
    pub query: Option<String>,
    pub sort: Sort,
    pub time: TimeRange,
    pub limit: Option<u32>,
}

/// Operation for a restricted search of a single subreddit
pub struct SearchOperation {
    options: SearchOptions,
    client: RedditClient,
}

impl SearchOperation {
    pub fn new(options: SearchOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<SearchResult, RedditClientError> {
        let (subreddit, query) = match (
            required(&self.options.subreddit),
            required(&self.options.query),
        ) {
            (Some(subreddit), Some(query)) => (subreddit, query),
            _ => {
                return Err(RedditClientError::ValidationError(
                    "Missing required --subreddit and --query".to_string(),
                ))
            }
        };

        let params = SearchParams {
            subreddit: subreddit.to_string(),
            query: query.to_string(),
            sort: self.options.sort,
            time: self.options.time,
            limit: self.options.limit.unwrap_or(DEFAULT_LIMIT),
        };

        info!("Searching r/{} for \"{}\"", params.subreddit, params.query);
        let result = search_subreddit(&self.client, &params).await?;
        info!("Found {} posts in r/{}", result.count, result.subreddit);
        Ok(result)
    }
}

/// Fetch one search listing and reduce it to a `SearchResult`.
/// Shared by the batch operations.
pub(crate) async fn search_subreddit(
    client: &RedditClient,
    params: &SearchParams,
) -> Result<SearchResult, RedditClientError> {
    let listing = client.search_subreddit(params).await?;
    let posts = listing
        .data
        .children
        .iter()
        .map(|child| Post::from_raw(&child.data))
        .collect();
    Ok(SearchResult::new(
        params.subreddit.clone(),
        params.query.clone(),
        posts,
    ))
}
