//! robots.txt: allow everything, point crawlers at the sitemap.

pub fn render(sitemap_url: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {}\n", sitemap_url)
}
