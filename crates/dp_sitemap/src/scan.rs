//! Reads emitted documents back: filename convention + front matter.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

use dp_core::{Error, Result};

lazy_static! {
    static ref RE_POST_FILENAME: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)\.md$").unwrap();
    static ref RE_FRONT_MATTER: Regex = Regex::new(r"(?s)^---\s*\n(.*?)\n---").unwrap();
    static ref RE_TITLE: Regex = Regex::new(r"(?m)^title:\s*(.*)$").unwrap();
    static ref RE_DATE: Regex =
        Regex::new(r"(?m)^date:\s*(\d{4}-\d{2}-\d{2})(?:[ T](\d{2}:\d{2}:\d{2}))?").unwrap();
}

/// One emitted document, as recovered from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEntry {
    pub slug: String,
    pub title: String,
    /// ISO 8601 timestamp with seconds precision, UTC.
    pub lastmod: Option<String>,
}

/// Walks the posts directory and parses every document that follows
/// the `YYYY-MM-DD-<slug>.md` convention. Files with unexpected names
/// or without front matter are skipped with a warning.
pub fn scan_posts(dir: &Path) -> Result<Vec<PostEntry>> {
    let mut entries = Vec::new();

    for result in WalkDir::new(dir) {
        let entry = result.map_err(|e| Error::Sitemap(format!("scanning {}: {}", dir.display(), e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with(".md") {
            continue;
        }

        let captures = match RE_POST_FILENAME.captures(&file_name) {
            Some(captures) => captures,
            None => {
                warn!("skipping {}: name does not match YYYY-MM-DD-slug.md", file_name);
                continue;
            }
        };
        let slug = captures[2].to_string();

        let contents = std::fs::read_to_string(entry.path())?;
        let front = match RE_FRONT_MATTER.captures(&contents) {
            Some(front) => front[1].to_string(),
            None => {
                warn!("skipping {}: no front matter found", file_name);
                continue;
            }
        };

        let title = RE_TITLE
            .captures(&front)
            .map(|c| c[1].trim().trim_matches(|q| q == '"' || q == '\'').to_string())
            .unwrap_or_else(|| "No Title".to_string());

        let lastmod = RE_DATE.captures(&front).map(|c| {
            let date = &c[1];
            match c.get(2) {
                Some(time) => format!("{}T{}+00:00", date, time.as_str()),
                None => format!("{}T00:00:00+00:00", date),
            }
        });

        entries.push(PostEntry { slug, title, lastmod });
    }

    entries.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_scan_parses_emitted_documents() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2024-03-05-hello-world.md",
            "---\nlayout: post\ntitle: \"Hello, World!\"\nauthor: \"Ed\"\ndate: 2024-03-05 08:30:00 +0000\n---\n\nBody.",
        );
        write(
            dir.path(),
            "2024-03-06-date-only.md",
            "---\ntitle: Date Only\ndate: 2024-03-06\n---\n\nBody.",
        );

        let entries = scan_posts(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].slug, "date-only");
        assert_eq!(entries[0].title, "Date Only");
        assert_eq!(
            entries[0].lastmod.as_deref(),
            Some("2024-03-06T00:00:00+00:00")
        );

        assert_eq!(entries[1].slug, "hello-world");
        assert_eq!(entries[1].title, "Hello, World!");
        assert_eq!(
            entries[1].lastmod.as_deref(),
            Some("2024-03-05T08:30:00+00:00")
        );
    }

    #[test]
    fn test_scan_skips_unconventional_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.md", "---\ntitle: Notes\n---\n\nBody.");
        write(dir.path(), "2024-03-05-no-header.md", "Just a body.");
        write(dir.path(), "README.txt", "not markdown");

        assert!(scan_posts(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_posts(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_scan_title_missing_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "2024-03-05-untitled.md",
            "---\nlayout: post\n---\n\nBody.",
        );
        let entries = scan_posts(dir.path()).unwrap();
        assert_eq!(entries[0].title, "No Title");
        assert_eq!(entries[0].lastmod, None);
    }
}
