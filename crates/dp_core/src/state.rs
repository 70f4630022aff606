use std::collections::HashSet;

use async_trait::async_trait;

use crate::Result;

/// Identifiers of posts that have already been emitted.
pub type PublishedSet = HashSet<String>;

/// Persistence for the set of already-published post identifiers.
///
/// The set only ever grows: callers add the identifier of the post
/// just emitted and save, never remove.
#[async_trait]
pub trait PublishState: Send + Sync {
    /// Loads the persisted set. A missing or unreadable store loads as
    /// an empty set, not an error.
    async fn load(&self) -> Result<PublishedSet>;

    /// Overwrites the persisted store with the given membership.
    async fn save(&self, ids: &PublishedSet) -> Result<()>;
}
