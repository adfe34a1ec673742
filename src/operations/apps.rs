use crate::client::{RateLimiter, RedditClient, RedditClientError};
use crate::models::{AppsResult, BatchError, SearchParams, Sort, TimeRange};
use crate::operations::required;
use crate::operations::search::search_subreddit;
use log::{info, warn};
use std::collections::HashSet;

pub const DEFAULT_LIMIT: u32 = 15;

/// Configuration options for researching apps in a category
#[derive(Debug, Clone, Default)]
pub struct AppsOptions {
    /// App category, e.g. "inventory" or "reviews"
    pub category: Option<String>,
    pub sort: Sort,
    pub time: TimeRange,
    pub limit: Option<u32>,
}

/// Operation that looks for app recommendations in a category: every
/// generated query is run against every apps subreddit, sequentially, and
/// the posts are deduplicated by id.
pub struct AppsOperation {
    options: AppsOptions,
    client: RedditClient,
}

impl AppsOperation {
    pub fn new(options: AppsOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<AppsResult, RedditClientError> {
        let category = required(&self.options.category).ok_or_else(|| {
            RedditClientError::ValidationError("Missing required --category".to_string())
        })?;

        let queries = category_queries(category);
        let subreddits = &self.client.config().apps_subreddits;
        let limit = self.options.limit.unwrap_or(DEFAULT_LIMIT);
        let mut limiter = RateLimiter::from_config(self.client.config());
        let mut seen = HashSet::new();
        let mut posts = Vec::new();
        let mut errors = Vec::new();
        let mut searches = 0;

        info!("Researching \"{}\" apps", category);

        for query in &queries {
            for subreddit in subreddits {
                limiter.wait().await;
                searches += 1;

                let params = SearchParams {
                    subreddit: subreddit.clone(),
                    query: query.clone(),
                    sort: self.options.sort,
                    time: self.options.time,
                    limit,
                };

                match search_subreddit(&self.client, &params).await {
                    Ok(result) => {
                        let before = posts.len();
                        posts.extend(
                            result
                                .posts
                                .into_iter()
                                .filter(|post| seen.insert(post.id.clone())),
                        );
                        info!(
                            "r/{} \"{}\": {} new posts",
                            subreddit,
                            query,
                            posts.len() - before
                        );
                    }
                    Err(err) => {
                        warn!("r/{} \"{}\" failed: {}", subreddit, query, err);
                        errors.push(BatchError {
                            subreddit: subreddit.clone(),
                            query: Some(query.clone()),
                            error: err.to_string(),
                        });
                    }
                }
            }
        }

        info!("Found {} unique posts", posts.len());

        Ok(AppsResult::new(
            category.to_string(),
            queries,
            searches,
            posts,
            errors,
        ))
    }
}

/// The search phrasings used for a category.
pub fn category_queries(category: &str) -> Vec<String> {
    vec![
        format!("{} app", category),
        format!("best {} app", category),
        format!("{} app recommendation", category),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_queries() {
        assert_eq!(
            category_queries("inventory"),
            vec![
                "inventory app",
                "best inventory app",
                "inventory app recommendation"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_category_is_validation_error() {
        let client = RedditClient::new().unwrap();
        let options = AppsOptions {
            category: Some("  ".to_string()),
            ..AppsOptions::default()
        };
        let err = AppsOperation::new(options, client)
            .execute()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required --category");
    }
}
