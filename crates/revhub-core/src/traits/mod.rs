//! Core traits defined in `revhub-core` and implemented by other crates.

pub mod storage;

pub use storage::AssetStore;
