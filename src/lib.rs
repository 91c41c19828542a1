//! In-memory orchid catalog.
//!
//! The crate holds a fixed dataset of orchids classified along six
//! characteristic taxonomies and exposes the operations a catalog front end
//! needs: browse by category, page through the gallery, inspect one orchid,
//! and create/update/remove orchids. Nothing is persisted. Public functions
//! here are the contract the `orchid-catalog` binary depends on.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub mod catalog;
pub mod config;
pub mod form;
pub mod gallery;
pub mod schema_loader;

pub use catalog::{
    CatalogError, CatalogManager, Category, CategoryRefs, CharacteristicEntry, CharacteristicId,
    OrchidCandidate, OrchidDetails, OrchidId, OrchidRecord, OrchidRepository, RawDataset,
    TaxonomyStore, load_dataset_from_path,
};
pub use config::CatalogConfig;
pub use form::OrchidForm;
pub use gallery::{
    CategoryCount, GalleryPage, OrchidView, category_summary, category_title, paginate,
};
pub use schema_loader::{validate_dataset_file, validate_dataset_value};

/// Load the catalog named by `config`.
pub fn load_catalog(config: &CatalogConfig) -> Result<CatalogManager> {
    CatalogManager::load(&config.data_path).with_context(|| {
        format!(
            "Unable to load orchid catalog from {}",
            config.data_path.display()
        )
    })
}

/// Install the stderr log subscriber used by the binaries.
///
/// The filter comes from `ORCHID_CATALOG_LOG` (EnvFilter syntax) and defaults
/// to `warn`, so ignored removals and unresolved references stay visible.
/// Calling it twice is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
