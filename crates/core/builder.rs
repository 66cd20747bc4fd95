//! Catalog builder
//!
//! Collects a dataset source and configuration, then validates and indexes
//! everything in one step.

use crate::catalog::{Catalog, Snapshot};
use crate::config::Config;
use crate::error::{Result, StaymapError};
use crate::storage::load_listings;
use staymap_types::listing::Listing;
use std::path::PathBuf;

/// Builder for a [`Catalog`] from a dataset file and/or in-memory listings.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    dataset: Option<PathBuf>,
    listings: Vec<Listing>,
    config: Config,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load listings from this file on build.
    pub fn dataset<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// Add listings directly. Combined with any dataset file.
    pub fn listings(mut self, listings: impl IntoIterator<Item = Listing>) -> Self {
        self.listings.extend(listings);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load, validate, and index. Fails on any bad listing or duplicate id.
    pub fn build(self) -> Result<Catalog> {
        self.config.validate().map_err(StaymapError::Config)?;

        let mut listings = self.listings;
        if let Some(path) = &self.dataset {
            listings.extend(load_listings(path)?);
        }

        Snapshot::build(listings, self.config).map(Catalog::new)
    }
}
