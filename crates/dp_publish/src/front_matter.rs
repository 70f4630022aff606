//! Front-matter block for emitted documents.
//!
//! String values and lists are JSON-encoded, which keeps them valid
//! YAML flow scalars/sequences while escaping quotes, colons and
//! newlines that would otherwise break the header.

use chrono::{DateTime, Utc};

use dp_core::{NormalizedPost, Result};

pub const FENCE: &str = "---";

/// Emission-date format: `YYYY-MM-DD HH:MM:SS ±ZZZZ`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

pub fn render(post: &NormalizedPost, author: &str, date: DateTime<Utc>) -> Result<String> {
    let mut lines = vec![
        FENCE.to_string(),
        "layout: post".to_string(),
        format!("title: {}", serde_json::to_string(&post.title)?),
        format!("author: {}", serde_json::to_string(author)?),
        format!("date: {}", date.format(DATE_FORMAT)),
    ];

    if !post.description.is_empty() {
        lines.push(format!(
            "description: {}",
            serde_json::to_string(&post.description)?
        ));
    }
    if let Some(image) = &post.image {
        lines.push(format!("image: {}", serde_json::to_string(image)?));
    }
    if !post.categories.is_empty() {
        lines.push(format!(
            "categories: {}",
            serde_json::to_string(&post.categories)?
        ));
    }
    if !post.tags.is_empty() {
        lines.push(format!("tags: {}", serde_json::to_string(&post.tags)?));
    }

    lines.push(FENCE.to_string());
    Ok(lines.join("\n"))
}
