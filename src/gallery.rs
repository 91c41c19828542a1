//! Presentation-neutral views over the catalog.
//!
//! These helpers shape what the manager returns into the pieces a front end
//! renders: gallery pages, category cards with orchid counts, and a detail
//! view with characteristic descriptions resolved. They never mutate the
//! catalog.

use crate::catalog::{CatalogManager, Category, CharacteristicEntry, OrchidId, OrchidRecord};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// One page of a gallery listing. Pages are numbered from 1.
pub struct GalleryPage<T> {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<T>,
}

/// Slice `items` into the requested page.
///
/// A zero page size is treated as 1 and page 0 as page 1. Pages past the end
/// come back empty with the real page count so callers can clamp their
/// navigation.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> GalleryPage<T> {
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = (page - 1).saturating_mul(page_size);
    let items = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();
    GalleryPage {
        page,
        page_size,
        total_pages,
        total_items,
        items,
    }
}

#[derive(Debug, Clone, Serialize)]
/// A taxonomy entry plus how many orchids reference it.
pub struct CategoryCount<'a> {
    #[serde(flatten)]
    pub entry: &'a CharacteristicEntry,
    pub orchids: usize,
}

/// Every entry of `category`, in taxonomy order, with its orchid count.
///
/// Entries nobody references are kept (count 0) so the browser can still
/// show them.
pub fn category_summary(manager: &CatalogManager, category: Category) -> Vec<CategoryCount<'_>> {
    manager
        .entries_of(category)
        .iter()
        .map(|entry| CategoryCount {
            entry,
            orchids: manager.filter_by_category(category, entry.id()).len(),
        })
        .collect()
}

/// Heading for a gallery filtered by one characteristic, e.g. "Genus: Vanda".
pub fn category_title(category: Category, entry: &CharacteristicEntry) -> String {
    format!("{}: {}", category.title(), entry.description())
}

#[derive(Debug, Clone, Serialize)]
/// Detail view of an orchid with each characteristic resolved.
pub struct OrchidView<'a> {
    pub id: OrchidId,
    pub name: &'a str,
    pub src: &'a str,
    pub genus: Option<&'a CharacteristicEntry>,
    #[serde(rename = "type")]
    pub kind: Option<&'a CharacteristicEntry>,
    pub luminosity: Option<&'a CharacteristicEntry>,
    pub temperature: Option<&'a CharacteristicEntry>,
    pub humidity: Option<&'a CharacteristicEntry>,
    pub size: Option<&'a CharacteristicEntry>,
}

impl<'a> OrchidView<'a> {
    pub fn resolve(manager: &'a CatalogManager, record: &'a OrchidRecord) -> Self {
        let resolve = |category: Category| manager.characteristic(record, category);
        Self {
            id: record.id(),
            name: record.name(),
            src: record.src(),
            genus: resolve(Category::Genus),
            kind: resolve(Category::Type),
            luminosity: resolve(Category::Luminosity),
            temperature: resolve(Category::Temperature),
            humidity: resolve(Category::Humidity),
            size: resolve(Category::Size),
        }
    }

    /// Card subtitle: the genus description, or an empty string.
    pub fn subtitle(&self) -> &'a str {
        self.genus.map(CharacteristicEntry::description).unwrap_or("")
    }
}
