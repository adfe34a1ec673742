use crate::client::{RedditClient, RedditClientError};
use crate::models::{flatten_comments, CommentsResult, Post};
use crate::operations::required;
use log::info;

pub const DEFAULT_LIMIT: u32 = 50;

/// Configuration options for fetching a post's comments
#[derive(Debug, Clone, Default)]
pub struct CommentsOptions {
    /// Any Reddit post URL or `/r/.../comments/...` path
    pub url: Option<String>,
    pub limit: Option<u32>,
}

/// Operation for fetching a post and its flattened comment tree
pub struct CommentsOperation {
    options: CommentsOptions,
    client: RedditClient,
}

impl CommentsOperation {
    pub fn new(options: CommentsOptions, client: RedditClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<CommentsResult, RedditClientError> {
        let url = required(&self.options.url).ok_or_else(|| {
            RedditClientError::ValidationError("Missing required --url".to_string())
        })?;
        let path = post_json_path(url).ok_or_else(|| {
            RedditClientError::ValidationError(format!("Invalid Reddit post URL: {}", url))
        })?;
        let limit = self.options.limit.unwrap_or(DEFAULT_LIMIT);

        info!("Fetching comments from {}", path);
        let (post_listing, comment_listing) = self.client.fetch_comments(&path, limit).await?;

        let post = post_listing
            .data
            .children
            .first()
            .map(|child| Post::from_raw(&child.data));
        if post.is_none() {
            info!("Post listing was empty (deleted or removed post)");
        }

        let comments = flatten_comments(
            &comment_listing.data.children,
            self.client.config().max_comment_depth,
        );
        info!("Extracted {} comments", comments.len());

        Ok(CommentsResult::new(post, comments))
    }
}

/// Reduce a Reddit post URL to its relative `.json` path: query string,
/// fragment, scheme, host and trailing slash are dropped.
pub fn post_json_path(raw: &str) -> Option<String> {
    let mut rest = raw.trim();
    if let Some(end) = rest.find(|c: char| c == '?' || c == '#') {
        rest = &rest[..end];
    }

    if let Some(idx) = rest.find("://") {
        rest = &rest[idx + 3..];
        rest = match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "",
        };
    } else if !rest.starts_with('/') && !rest.starts_with("r/") {
        // "reddit.com/r/..." without a scheme
        rest = match rest.find('/') {
            Some(slash) => &rest[slash..],
            None => "",
        };
    }

    let path = rest.trim_end_matches('/');
    let path = path.strip_suffix(".json").unwrap_or(path);
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return None;
    }
    Some(format!("/{}.json", path))
}
