//! # revhub-storage
//!
//! Live asset file storage. The live files are the working copies the
//! site serves; revisions of them are persisted separately by
//! `revhub-database`, and this crate is only ever read and written as
//! a side effect of saving and restoring. Two backends implement
//! [`AssetStore`]: the filesystem-backed [`LocalAssetStore`] and the
//! test-oriented [`MemoryAssetStore`].

pub mod local;
pub mod memory;

pub use local::LocalAssetStore;
pub use memory::MemoryAssetStore;
pub use revhub_core::traits::AssetStore;
