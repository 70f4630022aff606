pub mod error;
pub mod models;
pub mod source;
pub mod state;
pub mod types;

pub use error::Error;
pub use models::RewriteModel;
pub use source::PostSource;
pub use state::{PublishState, PublishedSet};
pub use types::{NormalizedPost, Post};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{Error, NormalizedPost, Post, PostSource, PublishState, Result, RewriteModel};
}
