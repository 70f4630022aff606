pub mod chunk;
pub mod models;
pub mod rewriter;
pub mod sentences;

pub use chunk::pack_paragraphs;
pub use models::create_model;
pub use rewriter::{RewriteOptions, Rewriter};
pub use sentences::limit_sentences_per_paragraph;

pub mod prelude {
    pub use super::models::create_model;
    pub use super::rewriter::{RewriteOptions, Rewriter};
    pub use dp_core::{Result, RewriteModel};
}
