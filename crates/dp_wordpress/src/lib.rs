pub mod api;
pub mod text;

pub use api::{SourceConfig, WordPressSource};
pub use text::{normalize, Substitutions};

pub mod prelude {
    pub use super::api::{SourceConfig, WordPressSource};
    pub use super::text::Substitutions;
    pub use dp_core::{NormalizedPost, Post, Result};
}
