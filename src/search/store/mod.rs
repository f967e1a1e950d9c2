mod json;
mod types;

pub use json::JsonStore;
pub use types::{Chunk, FileScore, IndexArtifact, IndexMeta, IndexStats, FORMAT_VERSION};

use std::path::Path;

use crate::error::Result;

/// Durable home of an [`IndexArtifact`].
pub trait IndexStore {
    fn path(&self) -> &Path;

    fn save(&self, artifact: &IndexArtifact) -> Result<()>;

    /// Fails with `RankError::IndexNotFound` when nothing was saved yet.
    fn load(&self) -> Result<IndexArtifact>;

    fn exists(&self) -> bool {
        self.path().exists()
    }
}
