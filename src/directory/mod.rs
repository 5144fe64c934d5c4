pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::error::UpstreamError;
pub use models::Post;

#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// The most-voted posts of the last two weeks, one page, no pagination.
    async fn fetch_recent_posts(&self) -> Result<Vec<Post>, UpstreamError>;
}
