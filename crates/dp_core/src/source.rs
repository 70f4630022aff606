use async_trait::async_trait;

use crate::types::Post;
use crate::Result;

/// A blog backend that can list every currently published post.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Returns the name of the blog source.
    fn name(&self) -> &str;

    /// Fetches the complete listing of published posts, following
    /// pagination until the source is exhausted.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}
