use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::core::ProximityError;
use crate::models::{CenterCategory, Located, MealCenter};

/// Errors that can occur while loading the meal center catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Center {id} has an invalid position: {source}")]
    InvalidCenter {
        id: u32,
        #[source]
        source: ProximityError,
    },

    #[error("Duplicate center id: {0}")]
    DuplicateId(u32),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    centers: Vec<MealCenter>,
}

/// Read-only catalog of meal centers
///
/// Loaded once at startup and shared between workers. Every center is
/// checked for a valid position and a unique id before the catalog is built.
#[derive(Debug, Clone, Default)]
pub struct CenterCatalog {
    centers: Vec<MealCenter>,
}

impl CenterCatalog {
    /// Load the catalog from a TOML file with `[[centers]]` tables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&contents)?;

        tracing::info!(
            "Loaded {} meal centers from {}",
            catalog.len(),
            path.as_ref().display()
        );

        Ok(catalog)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        Self::from_centers(file.centers)
    }

    /// Build a catalog from already-parsed centers
    pub fn from_centers(centers: Vec<MealCenter>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(centers.len());

        for center in &centers {
            center
                .coordinate()
                .validate()
                .map_err(|source| CatalogError::InvalidCenter { id: center.id, source })?;

            if !seen.insert(center.id) {
                return Err(CatalogError::DuplicateId(center.id));
            }
        }

        Ok(Self { centers })
    }

    pub fn all(&self) -> &[MealCenter] {
        &self.centers
    }

    pub fn get(&self, id: u32) -> Option<&MealCenter> {
        self.centers.iter().find(|center| center.id == id)
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Distinct categories present in the catalog, in declaration order
    pub fn categories(&self) -> Vec<CenterCategory> {
        self.centers
            .iter()
            .map(|center| center.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
