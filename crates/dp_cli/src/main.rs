use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use url::Url;

use dp_publish::{JsonStateFile, Outcome, PublishOptions, Publisher};
use dp_rewrite::{create_model, RewriteOptions, Rewriter};
use dp_sitemap::SiteConfig;
use dp_wordpress::{SourceConfig, Substitutions, WordPressSource};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            if let Ok(num) = current_number.parse::<u64>() {
                total_seconds += num;
                has_unit = true;
            } else {
                return Err("Invalid number in duration".to_string());
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scheduled blog re-publisher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch all posts and publish the newest one not yet emitted
    Publish {
        /// Site identifier at the blog host. Falls back to WORDPRESS_BLOG_ID.
        #[arg(long)]
        blog_id: Option<String>,
        #[arg(long, default_value = "_posts")]
        posts_dir: PathBuf,
        #[arg(long, default_value = "published_posts.json")]
        state_file: PathBuf,
        #[arg(long, default_value = "Editor")]
        author: String,
        /// Rewrite backend. Available models: gemini, dummy, none (skip rewriting)
        #[arg(long, default_value = "none")]
        model: String,
        /// Upper bound on rewrite chunk length, in characters
        #[arg(long, default_value_t = 3000)]
        chunk_size: usize,
        /// Rewrite attempts per chunk before keeping the original text
        #[arg(long, default_value_t = 3)]
        max_retries: u32,
        /// Pause between rewrite attempts (e.g. 5s, 2m)
        #[arg(long, default_value = "5s")]
        retry_delay: HumanDuration,
        /// Cap rewritten paragraphs at this many sentences
        #[arg(long)]
        max_sentences: Option<usize>,
        /// JSON file of {"phrase": "replacement"} word substitutions
        #[arg(long)]
        substitutions: Option<PathBuf>,
    },
    /// Regenerate sitemap.xml and robots.txt from the emitted posts
    Sitemap {
        #[arg(long, default_value = "_posts")]
        posts_dir: PathBuf,
        /// Canonical site root, e.g. https://example.github.io
        #[arg(long)]
        base_url: Url,
        #[arg(long, default_value = "sitemap.xml")]
        sitemap: PathBuf,
        #[arg(long, default_value = "robots.txt")]
        robots: PathBuf,
    },
}

#[allow(clippy::too_many_arguments)]
async fn run_publish(
    blog_id: Option<String>,
    posts_dir: PathBuf,
    state_file: PathBuf,
    author: String,
    model: String,
    chunk_size: usize,
    max_retries: u32,
    retry_delay: Duration,
    max_sentences: Option<usize>,
    substitutions: Option<PathBuf>,
) -> Result<()> {
    let blog_id = blog_id
        .or_else(|| std::env::var("WORDPRESS_BLOG_ID").ok())
        .ok_or_else(|| anyhow!("blog id is required: pass --blog-id or set WORDPRESS_BLOG_ID"))?;

    let substitutions = match substitutions {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading substitutions file {}", path.display()))?;
            let subs = Substitutions::from_json(&raw)
                .with_context(|| format!("parsing substitutions file {}", path.display()))?;
            info!("🔤 Word substitutions loaded from {}", path.display());
            subs
        }
        None => Substitutions::default(),
    };

    let source = Arc::new(WordPressSource::new(SourceConfig::new(blog_id)));
    let state = Arc::new(JsonStateFile::new(state_file));

    let api_key = std::env::var("GEMINI_API_KEY").ok();
    let rewriter = create_model(&model, api_key)?.map(|model| {
        info!("🧠 Rewrite model initialized (using {})", model.name());
        Rewriter::new(
            model,
            RewriteOptions {
                chunk_size,
                max_retries,
                retry_delay,
            },
        )
    });
    if rewriter.is_none() {
        info!("🧠 Rewrite stage disabled");
    }

    let publisher = Publisher::new(
        source,
        state,
        rewriter,
        substitutions,
        PublishOptions {
            posts_dir,
            author,
            max_sentences_per_paragraph: max_sentences,
        },
    );

    match publisher.run().await? {
        Outcome::Published { title, path, .. } => {
            info!("🎉 Done! Published \"{}\" to {}", title, path.display());
        }
        Outcome::NothingNew => {
            info!("🎉 No new posts available to publish today");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Publish {
            blog_id,
            posts_dir,
            state_file,
            author,
            model,
            chunk_size,
            max_retries,
            retry_delay,
            max_sentences,
            substitutions,
        } => {
            run_publish(
                blog_id,
                posts_dir,
                state_file,
                author,
                model,
                chunk_size,
                max_retries,
                retry_delay.0,
                max_sentences,
                substitutions,
            )
            .await?;
        }
        Commands::Sitemap {
            posts_dir,
            base_url,
            sitemap,
            robots,
        } => {
            let count = dp_sitemap::generate(&SiteConfig {
                base_url,
                posts_dir,
                sitemap_path: sitemap,
                robots_path: robots,
            })?;
            info!("🎉 Done! Sitemap lists {} document(s)", count);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration_parsing() {
        assert_eq!(
            "90".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(90)
        );
        assert_eq!(
            "5s".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(5)
        );
        assert_eq!(
            "2m30s".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(150)
        );
        assert_eq!(
            "1h".parse::<HumanDuration>().unwrap().0,
            Duration::from_secs(3600)
        );
        assert!("".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_cli_parses_publish_defaults() {
        let cli = Cli::parse_from(["drip", "publish", "--blog-id", "123"]);
        match cli.command {
            Commands::Publish {
                blog_id,
                model,
                chunk_size,
                max_retries,
                ..
            } => {
                assert_eq!(blog_id.as_deref(), Some("123"));
                assert_eq!(model, "none");
                assert_eq!(chunk_size, 3000);
                assert_eq!(max_retries, 3);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_sitemap() {
        let cli = Cli::parse_from([
            "drip",
            "sitemap",
            "--base-url",
            "https://example.github.io",
        ]);
        match cli.command {
            Commands::Sitemap { base_url, .. } => {
                assert_eq!(base_url.as_str(), "https://example.github.io/");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
