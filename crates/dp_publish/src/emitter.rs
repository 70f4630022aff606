//! Writes one emitted document per published post.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use dp_core::{NormalizedPost, Result};

use crate::front_matter;

/// Derives the document filename from the emission date and title:
/// `YYYY-MM-DD-<slug>.md`.
pub fn post_filename(date: DateTime<Utc>, title: &str) -> String {
    format!("{}-{}.md", date.format("%Y-%m-%d"), slug::slugify(title))
}

pub struct Emitter {
    posts_dir: PathBuf,
    author: String,
}

impl Emitter {
    pub fn new(posts_dir: impl Into<PathBuf>, author: impl Into<String>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            author: author.into(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Writes front matter + blank line + body to a new file named
    /// after `date` and the post's title. `body` is the final article
    /// text (normalized, possibly rewritten).
    pub async fn emit(
        &self,
        post: &NormalizedPost,
        body: &str,
        date: DateTime<Utc>,
    ) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.posts_dir).await?;

        let path = self.posts_dir.join(post_filename(date, &post.title));
        let header = front_matter::render(post, &self.author, date)?;
        let document = format!("{}\n\n{}", header, body);

        debug!("writing document to {}", path.display());
        tokio::fs::write(&path, document).await?;
        Ok(path)
    }
}
