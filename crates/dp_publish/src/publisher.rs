//! The publishing run: fetch, filter, pick, rewrite, emit, record.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use dp_core::{NormalizedPost, PostSource, PublishState, Result};
use dp_rewrite::{limit_sentences_per_paragraph, Rewriter};
use dp_wordpress::text::{normalize, Substitutions};

use crate::emitter::Emitter;

#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Directory the emitted documents are written to.
    pub posts_dir: PathBuf,
    /// Fixed author label for the front matter.
    pub author: String,
    /// When set, rewritten bodies are re-wrapped so no paragraph
    /// exceeds this many sentences.
    pub max_sentences_per_paragraph: Option<usize>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("_posts"),
            author: "Editor".to_string(),
            max_sentences_per_paragraph: None,
        }
    }
}

/// Result of one publishing run.
#[derive(Debug)]
pub enum Outcome {
    Published {
        id: String,
        title: String,
        path: PathBuf,
    },
    NothingNew,
}

/// Publishes at most one post per run: the newest post whose id is not
/// yet in the published set. Repeated scheduled runs drip-feed the
/// backlog one post at a time.
pub struct Publisher {
    source: Arc<dyn PostSource>,
    state: Arc<dyn PublishState>,
    rewriter: Option<Rewriter>,
    substitutions: Substitutions,
    options: PublishOptions,
}

impl Publisher {
    pub fn new(
        source: Arc<dyn PostSource>,
        state: Arc<dyn PublishState>,
        rewriter: Option<Rewriter>,
        substitutions: Substitutions,
        options: PublishOptions,
    ) -> Self {
        Self {
            source,
            state,
            rewriter,
            substitutions,
            options,
        }
    }

    pub async fn run(&self) -> Result<Outcome> {
        self.run_at(Utc::now()).await
    }

    /// Runs the pipeline with an explicit emission timestamp.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<Outcome> {
        let published = self.state.load().await?;
        info!("📚 {} post(s) already published", published.len());

        info!("📥 Fetching posts from {}", self.source.name());
        let posts = self.source.fetch_posts().await?;
        info!("🔎 {} post(s) found at the source", posts.len());

        let mut candidates: Vec<NormalizedPost> = posts
            .iter()
            .filter(|post| !published.contains(&post.id))
            .map(|post| normalize(post, &self.substitutions))
            .collect();
        info!("🆕 {} unpublished candidate(s)", candidates.len());

        if candidates.is_empty() {
            info!("🎉 Nothing new to publish today");
            return Ok(Outcome::NothingNew);
        }

        // Newest first, by the original publication date.
        candidates.sort_by(|a, b| b.date.cmp(&a.date));
        let post = candidates.swap_remove(0);
        info!("🌟 Publishing \"{}\" (id {})", post.title, post.id);

        let body = match &self.rewriter {
            Some(rewriter) => {
                let rewritten = rewriter.rewrite(&post.body).await;
                match self.options.max_sentences_per_paragraph {
                    Some(max) => limit_sentences_per_paragraph(&rewritten, max),
                    None => rewritten,
                }
            }
            None => post.body.clone(),
        };

        let emitter = Emitter::new(&self.options.posts_dir, &self.options.author);
        let path = emitter.emit(&post, &body, now).await?;
        info!("✅ Generated {}", path.display());

        let mut published = published;
        published.insert(post.id.clone());
        self.state.save(&published).await?;
        info!("💾 Published set updated ({} id(s))", published.len());

        Ok(Outcome::Published {
            id: post.id,
            title: post.title,
            path,
        })
    }
}
