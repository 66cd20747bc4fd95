//! The listing catalog served to readers.
//!
//! A [`Catalog`] holds the current [`Snapshot`] behind a lock that is only
//! taken long enough to clone or swap an `Arc`. Queries run against the
//! cloned snapshot, so a reload never blocks or tears an in-flight query.

use crate::config::Config;
use crate::error::Result;
use crate::storage::load_listings;
use parking_lot::RwLock;
use staymap_types::bbox::BoundingBox;
use staymap_types::listing::{Listing, ListingId};
use staymap_types::query::{
    ListingProjection, ListingSummary, NearestHigherResult, QueryFilter, StatsResult,
};
use std::path::Path;
use std::sync::Arc;

mod nearest;
mod snapshot;

pub use snapshot::Snapshot;

/// Shared, swappable handle to the current listing snapshot.
#[derive(Debug)]
pub struct Catalog {
    current: RwLock<Arc<Snapshot>>,
}

impl Catalog {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn builder() -> crate::builder::CatalogBuilder {
        crate::builder::CatalogBuilder::new()
    }

    /// Build a catalog from in-memory listings.
    pub fn from_listings(listings: Vec<Listing>, config: Config) -> Result<Self> {
        Snapshot::build(listings, config).map(Self::new)
    }

    /// Load a dataset file and build a catalog over it.
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let listings = load_listings(path)?;
        Self::from_listings(listings, config)
    }

    /// The snapshot queries should run against.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Install `snapshot` and return the one it replaced.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Rebuild from a dataset file with the current configuration.
    ///
    /// The old snapshot stays in place if loading or building fails.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config = self.snapshot().config().clone();
        let listings = load_listings(path.as_ref())?;
        let snapshot = Snapshot::build(listings, config)?;

        let count = snapshot.len();
        self.replace(snapshot);
        log::info!(
            "Reloaded catalog from {} ({} listings)",
            path.as_ref().display(),
            count
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    pub fn search_rectangle(
        &self,
        bbox: &BoundingBox,
        filter: &QueryFilter,
    ) -> Result<Vec<ListingProjection>> {
        self.snapshot().search_rectangle(bbox, filter)
    }

    pub fn stats(&self, bbox: &BoundingBox) -> Result<StatsResult> {
        self.snapshot().stats(bbox)
    }

    pub fn nearest_higher(&self, id: ListingId) -> Result<NearestHigherResult> {
        self.snapshot().nearest_higher(id)
    }

    pub fn list(&self, limit: Option<usize>) -> Vec<ListingSummary> {
        self.snapshot().list(limit)
    }
}
