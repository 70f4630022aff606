//! The rewrite stage: chunk, request, retry, degrade.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use dp_core::RewriteModel;

use crate::chunk::pack_paragraphs;

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Upper bound on chunk length, in characters.
    pub chunk_size: usize,
    /// Attempts per chunk before keeping the original text.
    pub max_retries: u32,
    /// Fixed pause between attempts. Tests inject `Duration::ZERO`.
    pub retry_delay: Duration,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

pub struct Rewriter {
    model: Arc<dyn RewriteModel>,
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(model: Arc<dyn RewriteModel>, options: RewriteOptions) -> Self {
        Self { model, options }
    }

    /// Rewrites `text` chunk by chunk. Never fails: a chunk whose
    /// rewrite keeps erroring or coming back empty is carried through
    /// unchanged, so the result is always usable.
    pub async fn rewrite(&self, text: &str) -> String {
        if text.trim().is_empty() {
            debug!("skipping rewrite of empty text");
            return String::new();
        }

        let chunks = pack_paragraphs(text, self.options.chunk_size);
        info!(
            "✍️ Rewriting {} chunk(s) with {}",
            chunks.len(),
            self.model.name()
        );

        let mut rewritten = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            rewritten.push(self.rewrite_chunk(i + 1, chunks.len(), chunk).await);
        }
        rewritten.join("\n\n")
    }

    async fn rewrite_chunk(&self, index: usize, total: usize, chunk: &str) -> String {
        for attempt in 1..=self.options.max_retries {
            debug!(
                "rewriting chunk {}/{} (attempt {}/{})",
                index, total, attempt, self.options.max_retries
            );
            match self.model.rewrite_chunk(chunk).await {
                Ok(text) if !text.trim().is_empty() => return text.trim().to_string(),
                Ok(_) => warn!("⚠️ Empty response for chunk {}/{}", index, total),
                Err(e) => warn!("⚠️ Rewrite failed for chunk {}/{}: {}", index, total, e),
            }
            if attempt < self.options.max_retries {
                tokio::time::sleep(self.options.retry_delay).await;
            }
        }

        warn!(
            "🚫 Keeping original text for chunk {}/{} after {} attempt(s)",
            index, total, self.options.max_retries
        );
        chunk.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dp_core::{Error, Result};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn options() -> RewriteOptions {
        RewriteOptions {
            chunk_size: 40,
            max_retries: 3,
            retry_delay: Duration::ZERO,
        }
    }

    struct ShoutingModel;

    #[async_trait]
    impl RewriteModel for ShoutingModel {
        fn name(&self) -> &str {
            "shouting"
        }

        async fn rewrite_chunk(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct FailingModel {
        calls: AtomicU32,
    }

    #[async_trait]
    impl RewriteModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn rewrite_chunk(&self, _text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Rewrite("unavailable".to_string()))
        }
    }

    struct EmptyModel;

    #[async_trait]
    impl RewriteModel for EmptyModel {
        fn name(&self) -> &str {
            "empty"
        }

        async fn rewrite_chunk(&self, _text: &str) -> Result<String> {
            Ok("   ".to_string())
        }
    }

    #[tokio::test]
    async fn test_rewrites_each_chunk_in_order() {
        let rewriter = Rewriter::new(Arc::new(ShoutingModel), options());
        let text = "first paragraph here\n\nsecond paragraph here\n\nthird one";
        let rewritten = rewriter.rewrite(text).await;
        assert_eq!(
            rewritten,
            "FIRST PARAGRAPH HERE\n\nSECOND PARAGRAPH HERE\n\nTHIRD ONE"
        );
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_original_text() {
        let model = Arc::new(FailingModel {
            calls: AtomicU32::new(0),
        });
        let rewriter = Rewriter::new(model.clone(), options());
        let text = "a paragraph that will not change";
        assert_eq!(rewriter.rewrite(text).await, text);
        assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_responses_fall_back_to_original_text() {
        let rewriter = Rewriter::new(Arc::new(EmptyModel), options());
        let text = "another unchanging paragraph";
        assert_eq!(rewriter.rewrite(text).await, text);
    }

    #[tokio::test]
    async fn test_empty_input_stays_empty() {
        let rewriter = Rewriter::new(Arc::new(ShoutingModel), options());
        assert_eq!(rewriter.rewrite("   ").await, "");
    }
}
