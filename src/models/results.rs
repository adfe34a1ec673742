use crate::models::{Comment, Post};
use serde::Serialize;

/// Posts found in one subreddit
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub subreddit: String,
    pub query: String,
    pub count: usize,
    pub posts: Vec<Post>,
}

impl SearchResult {
    pub fn new(subreddit: String, query: String, posts: Vec<Post>) -> Self {
        Self {
            subreddit,
            query,
            count: posts.len(),
            posts,
        }
    }
}

/// A post and its flattened comment tree. `post` is null when the post
/// listing came back empty (deleted or removed posts).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommentsResult {
    pub post: Option<Post>,
    pub count: usize,
    pub comments: Vec<Comment>,
}

impl CommentsResult {
    pub fn new(post: Option<Post>, comments: Vec<Comment>) -> Self {
        Self {
            post,
            count: comments.len(),
            comments,
        }
    }
}

/// One failed request inside a batch
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BatchError {
    pub subreddit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub error: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchAllResult {
    pub query: String,
    pub subreddits_searched: usize,
    pub subreddits_failed: usize,
    pub total_posts: usize,
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchError>>,
}

impl SearchAllResult {
    pub fn new(
        query: String,
        subreddits_searched: usize,
        posts: Vec<Post>,
        errors: Vec<BatchError>,
    ) -> Self {
        Self {
            query,
            subreddits_searched,
            subreddits_failed: errors.len(),
            total_posts: posts.len(),
            posts,
            errors: non_empty(errors),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AppsResult {
    pub category: String,
    pub queries: Vec<String>,
    pub searches_performed: usize,
    pub unique_posts: usize,
    pub posts: Vec<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<BatchError>>,
}

impl AppsResult {
    pub fn new(
        category: String,
        queries: Vec<String>,
        searches_performed: usize,
        posts: Vec<Post>,
        errors: Vec<BatchError>,
    ) -> Self {
        Self {
            category,
            queries,
            searches_performed,
            unique_posts: posts.len(),
            posts,
            errors: non_empty(errors),
        }
    }
}

fn non_empty(errors: Vec<BatchError>) -> Option<Vec<BatchError>> {
    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

/// Payload of a successful command, serialized as the bare inner result
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum CommandOutput {
    Search(SearchResult),
    Comments(CommentsResult),
    SearchAll(SearchAllResult),
    Apps(AppsResult),
}

/// The only shape ever written to stdout: `{ok, data}` or `{ok, error}`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CommandOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(data: CommandOutput) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Pretty-printed with two-space indentation
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            format!(
                "{{\n  \"ok\": false,\n  \"error\": {:?}\n}}",
                format!("Failed to serialize result: {}", e)
            )
        })
    }

    pub fn exit_code(&self) -> i32 {
        if self.ok {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("title {}", id),
            selftext: String::new(),
            score: 1,
            num_comments: 0,
            permalink: format!("https://www.reddit.com/r/shopify/comments/{}/", id),
            created_utc: 1_700_000_000,
            subreddit: "shopify".to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = Envelope::failure("Missing required --query");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"ok": false, "error": "Missing required --query"}));
        assert_eq!(envelope.exit_code(), 1);
    }

    #[test]
    fn test_success_envelope_is_unwrapped_result() {
        let result = SearchResult::new("shopify".to_string(), "q".to_string(), vec![post("a")]);
        let envelope = Envelope::success(CommandOutput::Search(result));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["data"]["subreddit"], json!("shopify"));
        assert_eq!(value["data"]["count"], json!(1));
        assert!(value.get("error").is_none());
        assert_eq!(envelope.exit_code(), 0);
    }

    #[test]
    fn test_pretty_json_uses_two_spaces() {
        let json = Envelope::failure("boom").to_json_pretty();
        assert_eq!(json, "{\n  \"ok\": false,\n  \"error\": \"boom\"\n}");
    }

    #[test]
    fn test_errors_omitted_when_empty() {
        let result = SearchAllResult::new("q".to_string(), 8, vec![post("a")], vec![]);
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("errors").is_none());
        assert_eq!(value["total_posts"], json!(1));
        assert_eq!(value["subreddits_failed"], json!(0));
    }

    #[test]
    fn test_counts_follow_posts() {
        let errors = vec![BatchError {
            subreddit: "dropship".to_string(),
            query: None,
            error: "HTTP 403".to_string(),
        }];
        let result = SearchAllResult::new("q".to_string(), 8, vec![post("a"), post("b")], errors);
        assert_eq!(result.total_posts, result.posts.len());
        assert_eq!(result.subreddits_failed, 1);

        let comments = CommentsResult::new(None, vec![]);
        let value = serde_json::to_value(&comments).unwrap();
        assert_eq!(value, json!({"post": null, "count": 0, "comments": []}));
    }
}
