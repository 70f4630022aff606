//! Markup-to-plain-text normalization.
//!
//! Bodies arrive from the source API as HTML. Normalization keeps the
//! paragraph structure (one blank line between paragraphs) while
//! dropping every tag, then applies the configured word substitutions.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex, RegexBuilder};
use scraper::{Html, Selector};

use dp_core::{NormalizedPost, Post, Result};

/// Maximum length of the description snippet, in characters.
const SNIPPET_LEN: usize = 200;

lazy_static! {
    // `</p>` becomes a paragraph break before any tag is removed, so
    // paragraph boundaries survive the generic tag strip below.
    static ref RE_PARAGRAPH_CLOSE: Regex = RegexBuilder::new(r"</p>")
        .case_insensitive(true)
        .build()
        .unwrap();
    static ref RE_IMG_TAG: Regex = Regex::new(r"<img[^>]*>").unwrap();
    static ref RE_DIV_TAG: Regex = RegexBuilder::new(r"</?div[^>]*>")
        .case_insensitive(true)
        .build()
        .unwrap();
    static ref RE_ANY_TAG: Regex = Regex::new(r"<[^<]+?>").unwrap();
    static ref RE_EXTRA_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref RE_ANCHOR: Regex = Regex::new(r"<a[^>]*>(.*?)</a>").unwrap();
}

/// Removes hyperlink wrappers while keeping the enclosed text.
pub fn strip_anchors(html: &str) -> String {
    RE_ANCHOR.replace_all(html, "$1").into_owned()
}

/// Strips markup down to plain text with paragraph breaks preserved.
pub fn strip_markup(html: &str) -> String {
    let text = RE_PARAGRAPH_CLOSE.replace_all(html, "\n\n");
    let text = RE_IMG_TAG.replace_all(&text, "");
    let text = RE_DIV_TAG.replace_all(&text, "");
    let text = RE_ANY_TAG.replace_all(&text, "");
    let text = RE_EXTRA_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Returns the `src` of the first inline image in the markup, if any.
pub fn extract_first_image(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    let selector = Selector::parse("img[src]").unwrap();
    fragment
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(|src| src.to_string())
}

/// A fixed phrase-to-replacement table applied to titles and bodies.
///
/// Matching is case-insensitive and runs on raw substrings, without
/// word-boundary anchoring, so a phrase also matches with affixes
/// attached. Longer phrases are applied before shorter ones so a long
/// phrase is never shadowed by a shorter prefix of itself.
#[derive(Debug, Default)]
pub struct Substitutions {
    rules: Vec<(Regex, String)>,
}

impl Substitutions {
    pub fn new<I>(map: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut pairs: Vec<(String, String)> = map.into_iter().collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        let rules = pairs
            .into_iter()
            .map(|(from, to)| {
                let pattern = RegexBuilder::new(&regex::escape(&from))
                    .case_insensitive(true)
                    .build()
                    .expect("escaped pattern is always valid");
                (pattern, to)
            })
            .collect();
        Self { rules }
    }

    /// Parses a JSON object of `{"phrase": "replacement"}` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: std::collections::BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::new(map))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, replacement) in &self.rules {
            out = pattern.replace_all(&out, NoExpand(replacement)).into_owned();
        }
        out
    }
}

/// Single-line snippet of the normalized body, bounded to
/// [`SNIPPET_LEN`] characters with a trailing ellipsis when truncated.
pub fn snippet(body: &str) -> String {
    let prefix: String = body.chars().take(SNIPPET_LEN).collect();
    let mut snippet = prefix.replace('\n', " ").trim().to_string();
    if body.chars().count() > SNIPPET_LEN {
        snippet.push_str("...");
    }
    snippet
}

/// Normalizes a fetched post: image extraction from the raw markup,
/// anchor removal, tag stripping, word substitution, snippet.
pub fn normalize(post: &Post, substitutions: &Substitutions) -> NormalizedPost {
    let image = post
        .featured_image
        .clone()
        .or_else(|| extract_first_image(&post.body));

    let body = strip_markup(&strip_anchors(&post.body));
    let body = substitutions.apply(&body);
    let description = snippet(&body);

    NormalizedPost {
        id: post.id.clone(),
        title: substitutions.apply(&post.title),
        body,
        description,
        image,
        date: post.date,
        categories: post.categories.clone(),
        tags: post.tags.clone(),
    }
}
