//! Spatial index over listing positions using an R*-tree.
//!
//! Built once per snapshot by bulk loading every listing position, then only
//! read. Rectangle queries prune through the tree's envelopes instead of
//! scanning the store; nearest-with-predicate queries go through
//! [`RingSearch`], which asks the tree for one ring envelope at a time.
//!
//! # Example
//!
//! ```rust
//! use staymap::compute::spatial::SpatialIndex;
//! use staymap::config::RingConfig;
//! use staymap::storage::ListingStore;
//! use staymap_types::{BoundingBox, Listing};
//!
//! let store = ListingStore::new(vec![
//!     Listing::new(1, -33.8688, 151.2093),
//!     Listing::new(2, -37.8136, 144.9631),
//! ])?;
//! let index = SpatialIndex::build(&store, RingConfig::default());
//!
//! let sydney = BoundingBox::new(-34.0, 151.0, -33.7, 151.4)?;
//! assert_eq!(index.query_bbox(&sydney), vec![0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::ring::{RingOutcome, RingSearch, RingSource};
use crate::config::RingConfig;
use crate::storage::{ListingStore, Slot};
use rstar::{AABB, Point as RstarPoint, RTree};
use staymap_types::bbox::BoundingBox;
use staymap_types::geo::Point;

/// Listing position stored in the R*-tree, x = longitude, y = latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedListing {
    pub lng: f64,
    pub lat: f64,
    pub slot: Slot,
}

impl IndexedListing {
    pub fn new(lng: f64, lat: f64, slot: Slot) -> Self {
        Self { lng, lat, slot }
    }

    fn corner(lng: f64, lat: f64) -> Self {
        Self::new(lng, lat, 0)
    }
}

impl RstarPoint for IndexedListing {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            lng: generator(0),
            lat: generator(1),
            slot: 0,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.lng,
            1 => self.lat,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.lng,
            1 => &mut self.lat,
            _ => unreachable!(),
        }
    }
}

/// Read-only spatial index over the slots of a [`ListingStore`].
pub struct SpatialIndex {
    tree: RTree<IndexedListing>,
    extent: Option<BoundingBox>,
    ring: RingSearch,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .field("extent", &self.extent)
            .field("ring", &self.ring)
            .finish()
    }
}

impl SpatialIndex {
    /// Bulk-load an index over every listing in `store`.
    pub fn build(store: &ListingStore, ring: RingConfig) -> Self {
        let points: Vec<IndexedListing> = store
            .iter()
            .map(|(slot, listing)| IndexedListing::new(listing.longitude, listing.latitude, slot))
            .collect();

        let positions: Vec<Point> = points.iter().map(|p| Point::new(p.lng, p.lat)).collect();
        let extent = BoundingBox::enclosing(&positions);

        Self {
            tree: RTree::bulk_load(points),
            extent,
            ring: RingSearch::new(ring),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Slots of every position inside `bbox` (inclusive), ascending.
    pub fn query_bbox(&self, bbox: &BoundingBox) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self
            .tree
            .locate_in_envelope(&envelope_of(bbox))
            .map(|point| point.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Nearest position whose slot satisfies `admissible`, by great-circle distance.
    ///
    /// Exclusions (such as the reference listing itself) are expressed through
    /// the predicate. Ties within the configured tolerance go to the lowest slot.
    pub fn nearest_matching<F>(&self, center: &Point, admissible: F) -> RingOutcome
    where
        F: FnMut(Slot) -> bool,
    {
        self.ring.run(self, center, admissible)
    }
}

impl RingSource for SpatialIndex {
    fn visit_window(&self, window: &BoundingBox, visit: &mut dyn FnMut(Slot, Point)) {
        for point in self.tree.locate_in_envelope(&envelope_of(window)) {
            visit(point.slot, Point::new(point.lng, point.lat));
        }
    }

    fn extent(&self) -> Option<BoundingBox> {
        self.extent
    }
}

#[inline]
fn envelope_of(bbox: &BoundingBox) -> AABB<IndexedListing> {
    AABB::from_corners(
        IndexedListing::corner(bbox.min_lng(), bbox.min_lat()),
        IndexedListing::corner(bbox.max_lng(), bbox.max_lat()),
    )
}
