//! Client for the hosted WordPress-style posts API.
//!
//! The listing endpoint is paginated with `number`/`offset` and
//! reports the total match count as `found`. Fetching continues until
//! a page comes back empty or the accumulated offset reaches `found`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use dp_core::{Error, Post, PostSource, Result};

const PAGE_SIZE: usize = 100;
const POST_FIELDS: &str = "ID,title,content,excerpt,categories,tags,date,featured_image";
const DEFAULT_API_BASE: &str = "https://public-api.wordpress.com/rest/v1.1";

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub blog_id: String,
    pub api_base: Url,
}

impl SourceConfig {
    pub fn new(blog_id: impl Into<String>) -> Self {
        Self {
            blog_id: blog_id.into(),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }

    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    fn posts_endpoint(&self) -> String {
        format!(
            "{}/sites/{}/posts",
            self.api_base.as_str().trim_end_matches('/'),
            self.blog_id
        )
    }
}

/// Raw listing page as returned by the API.
#[derive(Debug, Deserialize)]
struct PostsPage {
    #[serde(default)]
    found: u64,
    #[serde(default)]
    posts: Vec<WpPost>,
}

/// Raw post record. Category and tag objects arrive keyed by slug;
/// only their display names are kept.
#[derive(Debug, Deserialize)]
struct WpPost {
    #[serde(rename = "ID")]
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    categories: BTreeMap<String, Term>,
    #[serde(default)]
    tags: BTreeMap<String, Term>,
    #[serde(default)]
    featured_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Term {
    #[serde(default)]
    name: String,
}

fn term_names(terms: BTreeMap<String, Term>) -> Vec<String> {
    terms
        .into_values()
        .map(|t| t.name)
        .filter(|name| !name.is_empty())
        .collect()
}

fn into_post(raw: WpPost) -> Post {
    let date = match DateTime::parse_from_rfc3339(&raw.date) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => {
            warn!(
                "unparsable date {:?} on post {}, falling back to current time",
                raw.date, raw.id
            );
            Utc::now()
        }
    };

    Post {
        id: raw.id.to_string(),
        title: raw.title,
        body: raw.content,
        date,
        categories: term_names(raw.categories),
        tags: term_names(raw.tags),
        featured_image: raw.featured_image.filter(|url| !url.is_empty()),
    }
}

pub struct WordPressSource {
    client: Client,
    config: SourceConfig,
}

impl WordPressSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PostSource for WordPressSource {
    fn name(&self) -> &str {
        "WordPress"
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let endpoint = self.config.posts_endpoint();
        let mut posts = Vec::new();
        let mut offset = 0usize;

        loop {
            debug!("fetching posts page at offset {}", offset);
            let response = self
                .client
                .get(&endpoint)
                .query(&[
                    ("number", PAGE_SIZE.to_string()),
                    ("offset", offset.to_string()),
                    ("status", "publish".to_string()),
                    ("fields", POST_FIELDS.to_string()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Source(format!(
                    "posts request failed with {}: {}",
                    status, body
                )));
            }

            let page: PostsPage = response.json().await?;
            if page.posts.is_empty() {
                break;
            }

            offset += page.posts.len();
            posts.extend(page.posts.into_iter().map(into_post));

            if offset as u64 >= page.found {
                break;
            }
        }

        Ok(posts)
    }
}
