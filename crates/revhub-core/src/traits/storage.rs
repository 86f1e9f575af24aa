//! Storage collaborator trait for the live asset files.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::asset::AssetKind;

/// Trait for reading and writing the live editable asset files.
///
/// The live content is owned by the storage collaborator, never by the
/// revision store: revisions capture it, restores overwrite it. The
/// [`AssetStore`] trait is defined here in `revhub-core` and implemented
/// in `revhub-storage`.
#[async_trait]
pub trait AssetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the store type name (e.g., "local", "memory").
    fn store_type(&self) -> &str;

    /// Read the live content of an asset. Returns `None` when the file
    /// does not exist yet.
    async fn read(&self, kind: AssetKind) -> AppResult<Option<String>>;

    /// Write the live content of an asset, replacing any previous content.
    /// The write must be atomic: a failure never leaves a partial file.
    async fn write(&self, kind: AssetKind, content: &str) -> AppResult<()>;

    /// Check whether the live file for an asset exists.
    async fn exists(&self, kind: AssetKind) -> AppResult<bool>;
}
