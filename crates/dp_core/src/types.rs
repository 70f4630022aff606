use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as fetched from the source blog API, validated at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Raw markup body, exactly as the source returned it.
    pub body: String,
    pub date: DateTime<Utc>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
}

/// A post after markup removal and word substitution, ready for
/// rewriting and emission. Paragraphs in `body` are separated by
/// exactly one blank line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedPost {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Single-line snippet of the body, bounded length.
    pub description: String,
    /// Featured image if the source supplied one, else the first
    /// inline image found in the markup.
    pub image: Option<String>,
    pub date: DateTime<Utc>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl NormalizedPost {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.split("\n\n").filter(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_paragraphs_skip_blanks() {
        let post = NormalizedPost {
            id: "1".to_string(),
            title: "Test".to_string(),
            body: "First paragraph.\n\nSecond paragraph.\n\n".to_string(),
            description: String::new(),
            image: None,
            date: Utc::now(),
            categories: vec![],
            tags: vec![],
        };
        let paragraphs: Vec<&str> = post.paragraphs().collect();
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }
}
