pub mod emitter;
pub mod front_matter;
pub mod publisher;
pub mod state;

pub use emitter::{post_filename, Emitter};
pub use publisher::{Outcome, PublishOptions, Publisher};
pub use state::JsonStateFile;

pub mod prelude {
    pub use super::publisher::{Outcome, PublishOptions, Publisher};
    pub use super::state::JsonStateFile;
    pub use dp_core::{PublishState, Result};
}
