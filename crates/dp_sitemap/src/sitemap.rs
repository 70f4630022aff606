//! Sitemap XML serialization.

use chrono::{DateTime, Utc};
use url::Url;

use crate::scan::PostEntry;

/// XML namespace for sitemaps.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl Sitemap {
    /// Builds the listing: one homepage entry stamped with the
    /// generation time, then one entry per emitted document, with the
    /// canonical URL `{base}/{slug}/`.
    pub fn from_entries(
        base_url: &Url,
        generated_at: DateTime<Utc>,
        entries: &[PostEntry],
    ) -> Self {
        let base = base_url.as_str().trim_end_matches('/');

        let mut urls = vec![UrlEntry {
            loc: format!("{}/", base),
            lastmod: Some(
                generated_at
                    .format("%Y-%m-%dT%H:%M:%S+00:00")
                    .to_string(),
            ),
        }];
        urls.extend(entries.iter().map(|entry| UrlEntry {
            loc: format!("{}/{}/", base, entry.slug),
            lastmod: entry.lastmod.clone(),
        }));

        Self { urls }
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(slug: &str, lastmod: Option<&str>) -> PostEntry {
        PostEntry {
            slug: slug.to_string(),
            title: slug.to_string(),
            lastmod: lastmod.map(|s| s.to_string()),
        }
    }

    fn base() -> Url {
        Url::parse("https://example.github.io").unwrap()
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_homepage_entry_always_present() {
        let xml = Sitemap::from_entries(&base(), generated_at(), &[]).into_xml();
        assert!(xml.contains("<loc>https://example.github.io/</loc>"));
        assert!(xml.contains("<lastmod>2024-03-05T12:00:00+00:00</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 1);
    }

    #[test]
    fn test_one_entry_per_document() {
        let entries = vec![
            entry("first-post", Some("2024-03-01T00:00:00+00:00")),
            entry("second-post", None),
        ];
        let xml = Sitemap::from_entries(&base(), generated_at(), &entries).into_xml();

        assert!(xml.contains("<loc>https://example.github.io/first-post/</loc>"));
        assert!(xml.contains("<lastmod>2024-03-01T00:00:00+00:00</lastmod>"));
        assert!(xml.contains("<loc>https://example.github.io/second-post/</loc>"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert_eq!(xml.matches("</url>").count(), 3);
    }

    #[test]
    fn test_xml_structure() {
        let xml = Sitemap::from_entries(&base(), generated_at(), &[entry("p", None)]).into_xml();
        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
    }

    #[test]
    fn test_locations_are_escaped() {
        let xml =
            Sitemap::from_entries(&base(), generated_at(), &[entry("a&b", None)]).into_xml();
        assert!(xml.contains("<loc>https://example.github.io/a&amp;b/</loc>"));
    }
}
