pub mod ring;
pub use ring::{MAX_RADIUS_M, Neighbor, RingOutcome, RingSearch, RingSource, window_around};

pub mod rtree;
pub use rtree::{IndexedListing, SpatialIndex};
