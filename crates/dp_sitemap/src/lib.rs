//! Derives `sitemap.xml` and `robots.txt` from the emitted documents.
//!
//! Both outputs are pure functions of the posts directory: scanning,
//! URL derivation, and serialization have no state of their own, so
//! regeneration is idempotent.

pub mod robots;
pub mod scan;
pub mod sitemap;

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;
use url::Url;

use dp_core::Result;

pub use scan::PostEntry;
pub use sitemap::Sitemap;

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Canonical site root, e.g. `https://example.github.io`.
    pub base_url: Url,
    /// Directory holding the emitted documents.
    pub posts_dir: PathBuf,
    pub sitemap_path: PathBuf,
    pub robots_path: PathBuf,
}

/// Scans the posts directory and writes both the sitemap and the
/// robots file.
pub fn generate(config: &SiteConfig) -> Result<usize> {
    let entries = scan::scan_posts(&config.posts_dir)?;
    info!("🗺️ {} document(s) listed", entries.len());

    let sitemap = Sitemap::from_entries(&config.base_url, Utc::now(), &entries);
    std::fs::write(&config.sitemap_path, sitemap.into_xml())?;
    info!("✅ Generated {}", config.sitemap_path.display());

    let sitemap_url = format!(
        "{}/sitemap.xml",
        config.base_url.as_str().trim_end_matches('/')
    );
    std::fs::write(&config.robots_path, robots::render(&sitemap_url))?;
    info!("✅ Generated {}", config.robots_path.display());

    Ok(entries.len())
}
