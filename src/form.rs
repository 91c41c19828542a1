//! Coercion of raw form submissions into catalog inputs.
//!
//! Front ends hand over plain strings. This module turns them into
//! `OrchidCandidate` / `OrchidDetails` with canonical integer ids, so the
//! catalog manager never parses text. An empty category value, or "0", means
//! "not given"; any other value must be a non-negative integer.

use crate::catalog::{
    CatalogError, Category, CategoryRefs, CharacteristicId, OrchidCandidate, OrchidDetails,
};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
/// Raw field values as submitted by the orchid form.
pub struct OrchidForm {
    pub name: String,
    pub src: String,
    categories: BTreeMap<Category, String>,
}

impl OrchidForm {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: src.into(),
            categories: BTreeMap::new(),
        }
    }

    /// Set the raw value submitted for one category select.
    pub fn set_category(&mut self, category: Category, value: impl Into<String>) {
        self.categories.insert(category, value.into());
    }

    pub fn with_category(mut self, category: Category, value: impl Into<String>) -> Self {
        self.set_category(category, value);
        self
    }

    /// Set a field by its form name (`name`, `src` or a category name).
    ///
    /// Each field may be given once; repeats are rejected so a submission
    /// cannot be ambiguous.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), CatalogError> {
        let value = value.into();
        match field {
            "name" => set_once(&mut self.name, field, value),
            "src" => set_once(&mut self.src, field, value),
            other => {
                let category: Category = other.parse()?;
                if self.categories.contains_key(&category) {
                    return Err(repeated(field, &value));
                }
                self.categories.insert(category, value);
                Ok(())
            }
        }
    }

    /// Coerce into a create candidate. The name must not be blank.
    pub fn into_candidate(self) -> Result<OrchidCandidate, CatalogError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::InvalidField {
                field: "name".to_string(),
                value: self.name,
            });
        }
        Ok(OrchidCandidate {
            name,
            src: self.src.trim().to_string(),
            characteristics: coerce_categories(&self.categories)?,
        })
    }

    /// Coerce into update details; absent categories stay absent.
    pub fn into_details(self) -> Result<OrchidDetails, CatalogError> {
        Ok(OrchidDetails {
            name: self.name.trim().to_string(),
            src: self.src.trim().to_string(),
            characteristics: coerce_categories(&self.categories)?,
        })
    }
}

fn set_once(slot: &mut String, field: &str, value: String) -> Result<(), CatalogError> {
    if !slot.is_empty() {
        return Err(repeated(field, &value));
    }
    *slot = value;
    Ok(())
}

fn repeated(field: &str, value: &str) -> CatalogError {
    CatalogError::InvalidField {
        field: format!("{field} (given more than once)"),
        value: value.to_string(),
    }
}

fn coerce_categories(raw: &BTreeMap<Category, String>) -> Result<CategoryRefs, CatalogError> {
    let mut refs = CategoryRefs::default();
    for (category, value) in raw {
        refs.set(*category, coerce_id(*category, value)?);
    }
    Ok(refs)
}

fn coerce_id(category: Category, value: &str) -> Result<Option<CharacteristicId>, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(id) => Ok(Some(CharacteristicId(id))),
        Err(_) => Err(CatalogError::InvalidField {
            field: category.as_str().to_string(),
            value: value.to_string(),
        }),
    }
}
