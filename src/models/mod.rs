use serde::Serialize;

pub mod listing;
pub mod results;

use listing::{RawComment, RawPost, Thing};

pub use results::{
    AppsResult, BatchError, CommandOutput, CommentsResult, Envelope, SearchAllResult,
    SearchResult,
};

pub const SELFTEXT_MAX_CHARS: usize = 500;
pub const COMMENT_BODY_MAX_CHARS: usize = 1000;

const REDDIT_ORIGIN: &str = "https://www.reddit.com";

/// Result ordering accepted by Reddit search
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Relevance => "relevance",
            Sort::Hot => "hot",
            Sort::Top => "top",
            Sort::New => "new",
        }
    }
}

/// Time window accepted by Reddit search (`t=`)
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Hour,
    Day,
    Week,
    Month,
    #[default]
    Year,
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }
}

/// One restricted-subreddit search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub subreddit: String,
    pub query: String,
    pub sort: Sort,
    pub time: TimeRange,
    pub limit: u32,
}

/// A post reduced to the fields callers consume
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub score: i64,
    pub num_comments: i64,
    pub permalink: String,
    pub created_utc: i64,
    pub subreddit: String,
    pub url: String,
}

impl Post {
    pub fn from_raw(raw: &RawPost) -> Self {
        let permalink = raw.permalink.as_deref().unwrap_or_default();
        Self {
            id: raw.id.clone().unwrap_or_default(),
            title: raw.title.clone().unwrap_or_default(),
            selftext: truncate_chars(
                raw.selftext.as_deref().unwrap_or_default(),
                SELFTEXT_MAX_CHARS,
            ),
            score: raw.score.unwrap_or_default(),
            num_comments: raw.num_comments.unwrap_or_default(),
            permalink: absolute_permalink(permalink),
            created_utc: raw.created_utc.unwrap_or_default() as i64,
            subreddit: raw.subreddit.clone().unwrap_or_default(),
            url: raw.url.clone().unwrap_or_default(),
        }
    }
}

/// A comment with its position in the reply tree
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created_utc: i64,
    pub depth: usize,
}

impl Comment {
    pub fn from_raw(raw: &RawComment, depth: usize) -> Self {
        Self {
            id: raw.id.clone().unwrap_or_default(),
            author: raw.author.clone().unwrap_or_default(),
            body: truncate_chars(
                raw.body.as_deref().unwrap_or_default(),
                COMMENT_BODY_MAX_CHARS,
            ),
            score: raw.score.unwrap_or_default(),
            created_utc: raw.created_utc.unwrap_or_default() as i64,
            depth,
        }
    }
}

/// Flatten a comment tree in pre-order (each comment before its replies).
/// Only depths `0..max_depth` are kept; anything deeper is dropped.
pub fn flatten_comments(children: &[Thing<RawComment>], max_depth: usize) -> Vec<Comment> {
    let mut out = Vec::new();
    flatten_into(children, 0, max_depth, &mut out);
    out
}

fn flatten_into(
    children: &[Thing<RawComment>],
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Comment>,
) {
    if depth >= max_depth {
        return;
    }
    for child in children {
        // "more" stubs carry no comment body
        if child.kind != "t1" {
            continue;
        }
        out.push(Comment::from_raw(&child.data, depth));
        flatten_into(child.data.replies.children(), depth + 1, max_depth, out);
    }
}

/// Keep at most `max` characters, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn absolute_permalink(permalink: &str) -> String {
    if permalink.is_empty() || permalink.starts_with("http") {
        permalink.to_string()
    } else {
        format!("{}{}", REDDIT_ORIGIN, permalink)
    }
}
