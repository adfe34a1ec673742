use serde::Deserialize;

/// Reddit's listing container. Every field defaults so partial or odd
/// listings still decode.
#[derive(Deserialize, Debug)]
pub struct Listing<T> {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub data: ListingData<T>,
}

#[derive(Deserialize, Debug)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<Thing<T>>,
}

impl<T> Default for ListingData<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

/// A listing child: `kind` is `t3` for posts, `t1` for comments and
/// `more` for collapsed "load more" stubs.
#[derive(Deserialize, Debug)]
pub struct Thing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub selftext: Option<String>,
    pub score: Option<i64>,
    pub num_comments: Option<i64>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub subreddit: Option<String>,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawComment {
    pub id: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<f64>,
    pub replies: Replies,
}

/// `replies` is a nested listing, or an empty string when there are none.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum Replies {
    Listing(Box<Listing<RawComment>>),
    Empty(serde_json::Value),
}

impl Default for Replies {
    fn default() -> Self {
        Replies::Empty(serde_json::Value::Null)
    }
}

impl Replies {
    pub fn children(&self) -> &[Thing<RawComment>] {
        match self {
            Replies::Listing(listing) => &listing.data.children,
            Replies::Empty(_) => &[],
        }
    }
}

/// The comments endpoint answers `[post listing, comments listing]`.
pub type CommentsResponse = (Listing<RawPost>, Listing<RawComment>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_replies() {
        let comment: RawComment =
            serde_json::from_str(r#"{"id": "c1", "body": "hi", "replies": ""}"#).unwrap();
        assert!(comment.replies.children().is_empty());
        assert_eq!(comment.id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_nested_replies() {
        let comment: RawComment = serde_json::from_str(
            r#"{"id": "c1", "replies": {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"id": "c2", "replies": ""}}
            ]}}}"#,
        )
        .unwrap();
        let children = comment.replies.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].data.id.as_deref(), Some("c2"));
    }

    #[test]
    fn test_more_stub_decodes() {
        let thing: Thing<RawComment> = serde_json::from_str(
            r#"{"kind": "more", "data": {"count": 4, "id": "m1", "children": ["a", "b"]}}"#,
        )
        .unwrap();
        assert_eq!(thing.kind, "more");
    }

    #[test]
    fn test_null_fields_default() {
        let post: RawPost =
            serde_json::from_str(r#"{"id": "p1", "selftext": null, "url": null}"#).unwrap();
        assert_eq!(post.id.as_deref(), Some("p1"));
        assert!(post.selftext.is_none());
        assert!(post.score.is_none());
    }

    #[test]
    fn test_comments_response_shape() {
        let response: CommentsResponse = serde_json::from_str(
            r#"[{"kind": "Listing", "data": {"children": []}},
                {"kind": "Listing", "data": {"children": []}}]"#,
        )
        .unwrap();
        assert!(response.0.data.children.is_empty());
        assert!(response.1.data.children.is_empty());
    }
}
