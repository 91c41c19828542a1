//! Runtime configuration for catalog hosts.
//!
//! Settings come from the environment so the CLI and tests share one
//! resolution order: an explicit override wins, otherwise the bundled sample
//! dataset and default page size are used.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};

pub const DATA_ENV: &str = "ORCHID_CATALOG_DATA";
pub const PAGE_SIZE_ENV: &str = "ORCHID_CATALOG_PAGE_SIZE";
pub const LOG_ENV: &str = "ORCHID_CATALOG_LOG";
pub const DEFAULT_PAGE_SIZE: usize = 6;

const BUNDLED_DATASET: &str = "data/orchids.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub data_path: PathBuf,
    pub page_size: usize,
}

impl CatalogConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = match lookup(DATA_ENV).filter(|value| !value.trim().is_empty()) {
            Some(hint) => data_path_from_hint(&hint)?,
            None => bundled_dataset_path(),
        };
        let page_size = match lookup(PAGE_SIZE_ENV).filter(|value| !value.trim().is_empty()) {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };
        Ok(Self {
            data_path,
            page_size,
        })
    }

    /// Replace the dataset path, rejecting files that do not exist.
    pub fn with_data_path(mut self, path: &Path) -> Result<Self> {
        self.data_path = data_path_from_hint(&path.to_string_lossy())?;
        Ok(self)
    }
}

/// Location of the sample dataset shipped with the crate.
pub fn bundled_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_DATASET)
}

fn data_path_from_hint(hint: &str) -> Result<PathBuf> {
    let path = PathBuf::from(hint.trim());
    if !path.is_file() {
        bail!(
            "dataset {} not found. Set {DATA_ENV} to an existing JSON file.",
            path.display()
        );
    }
    Ok(path)
}

fn parse_page_size(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{PAGE_SIZE_ENV} must be a positive integer, got '{raw}'"))?;
    if value == 0 {
        bail!("{PAGE_SIZE_ENV} must be a positive integer, got '{raw}'");
    }
    Ok(value)
}
