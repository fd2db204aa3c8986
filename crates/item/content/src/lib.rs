//! Content loading for the stowage subsystem.
//!
//! This crate reads the RON configuration tree and mount definition files
//! into the immutable snapshot types from [`item_core`], and models the
//! host's loaded-part-definition list as a [`catalog::PartCatalog`] the
//! loader orchestrator can iterate and extend with inventory capabilities.
pub mod catalog;
pub mod formats;
pub mod loaders;

pub use catalog::{
    CatalogError, EVA_FEMALE, EVA_MALE, EVA_VINTAGE, InventoryKind, PartCatalog, PartDefinition,
    SeatInventory, is_reserved_eva,
};
pub use loaders::{ConfigLoader, LoadResult, MountLoader};
