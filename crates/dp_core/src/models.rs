use async_trait::async_trait;

use crate::Result;

/// A generative model that can rewrite a chunk of plain text.
#[async_trait]
pub trait RewriteModel: Send + Sync {
    /// Returns the name of the model backend.
    fn name(&self) -> &str;

    /// Rewrites one paragraph-aligned chunk. An empty return value is
    /// treated by callers the same as an error.
    async fn rewrite_chunk(&self, text: &str) -> Result<String>;
}
