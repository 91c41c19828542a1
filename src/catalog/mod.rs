//! Orchid catalog core.
//!
//! `TaxonomyStore` holds the six characteristic taxonomies loaded from the
//! startup dataset; `CatalogManager` owns the orchid records, resolves their
//! characteristic references and mediates every create/update/remove.
//! Types in `model` mirror the dataset JSON and the identified entities.

pub mod error;
pub mod identity;
pub mod index;
pub mod manager;
pub mod model;
pub mod repository;

pub use error::CatalogError;
pub use identity::{Category, CharacteristicId, OrchidId};
pub use index::TaxonomyStore;
pub use manager::CatalogManager;
pub use model::{
    CategoryRefs, CharacteristicEntry, OrchidCandidate, OrchidDetails, OrchidRecord,
    RawCharacteristic, RawDataset, RawId, RawOrchid,
};
pub use repository::OrchidRepository;

pub use model::load_dataset_from_path;
