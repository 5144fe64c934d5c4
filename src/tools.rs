use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::directory::Post;

/// A directory post reshaped for the listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolListing {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub votes: Option<i64>,
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub featured_at: Option<DateTime<Utc>>,
    /// `featured_at` when present, otherwise `created_at`.
    pub date: DateTime<Utc>,
}

/// Case-insensitive substring match of topic names against a vocabulary.
pub struct TopicFilter {
    keywords: Vec<String>,
}

impl TopicFilter {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn matches(&self, topics: &[String]) -> bool {
        topics.iter().any(|topic| {
            let lower = topic.to_lowercase();
            self.keywords.iter().any(|kw| lower.contains(kw.as_str()))
        })
    }
}

impl From<Post> for ToolListing {
    fn from(post: Post) -> Self {
        // An empty tagline falls back too.
        let description = post
            .tagline
            .filter(|t| !t.is_empty())
            .or(post.description);
        ToolListing {
            date: post.featured_at.unwrap_or(post.created_at),
            id: post.id,
            name: post.name,
            description,
            url: post.url,
            votes: post.votes_count,
            topics: post.topics,
            created_at: post.created_at,
            featured_at: post.featured_at,
        }
    }
}

/// Newest first; equal dates go to the higher vote count (missing = 0).
fn newest_then_most_voted(a: &ToolListing, b: &ToolListing) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.votes.unwrap_or(0).cmp(&a.votes.unwrap_or(0)))
}

/// Drop posts without an AI-related topic, reshape the rest and sort them.
pub fn aggregate(posts: Vec<Post>, keywords: &[String]) -> Vec<ToolListing> {
    let filter = TopicFilter::new(keywords);
    let total = posts.len();

    let mut tools: Vec<ToolListing> = posts
        .into_iter()
        .filter(|post| filter.matches(&post.topics))
        .map(ToolListing::from)
        .collect();
    tools.sort_by(newest_then_most_voted);

    tracing::debug!(total, kept = tools.len(), "aggregated tool listings");
    tools
}
