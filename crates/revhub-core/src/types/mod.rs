//! Shared domain primitive types.

pub mod asset;
pub mod pagination;

pub use asset::AssetKind;
pub use pagination::{PageRequest, PageResponse};
