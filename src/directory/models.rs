use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One post from the tools directory, with its topics flattened to names.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub votes_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub featured_at: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
}

// --- GraphQL wire shapes ---

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    pub data: Option<PostsData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostsData {
    pub posts: Connection<PostNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostNode {
    pub id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub votes_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub featured_at: Option<DateTime<Utc>>,
    pub topics: Option<Connection<TopicNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopicNode {
    pub name: String,
}

impl From<PostNode> for Post {
    fn from(node: PostNode) -> Self {
        Post {
            id: node.id,
            name: node.name,
            tagline: node.tagline,
            description: node.description,
            url: node.url,
            votes_count: node.votes_count,
            created_at: node.created_at,
            featured_at: node.featured_at,
            topics: node
                .topics
                .map(|t| t.edges.into_iter().map(|e| e.node.name).collect())
                .unwrap_or_default(),
        }
    }
}
