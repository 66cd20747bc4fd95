//! In-memory geospatial query engine for lodging listings.
//!
//! ## Features
//! - **Rectangle search**: listings inside a lat/lng box, filtered by
//!   availability on a date, minimum rating, and maximum nightly price
//! - **Area stats**: listing count and average rating inside a box
//! - **Nearest higher-rated**: closest listing rated strictly above a given one,
//!   by great-circle distance, via an expanding-ring search over an R*-tree
//! - **Hot reload**: queries run on immutable snapshots that can be swapped atomically
//!
//! ```rust
//! use staymap::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2019, 1, 15).unwrap();
//! let catalog = Catalog::builder()
//!     .listings(vec![
//!         Listing::new(1, -33.8688, 151.2093)
//!             .with_rating(90.0)
//!             .with_price(120.0)
//!             .with_calendar(Calendar::new().with_day(date, CalendarDay::available(None))),
//!         Listing::new(2, -33.8568, 151.2153).with_rating(95.0),
//!     ])
//!     .build()?;
//!
//! let cbd = BoundingBox::new(-33.88, 151.19, -33.85, 151.22)?;
//! let hits = catalog.search_rectangle(&cbd, &QueryFilter::on(date))?;
//! assert_eq!(hits.len(), 1);
//!
//! let stats = catalog.stats(&cbd)?;
//! assert_eq!(stats.listing_count, 2);
//!
//! let nearest = catalog.nearest_higher(ListingId(1))?;
//! assert_eq!(nearest.listing.id, ListingId(2));
//! # Ok::<(), StaymapError>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod compute;
pub mod config;
pub mod error;
pub mod storage;

pub use builder::CatalogBuilder;
pub use catalog::{Catalog, Snapshot};
pub use config::{Config, RingConfig};
pub use error::{ErrorKind, Result, StaymapError};

pub use staymap_types::{
    BoundingBox, Calendar, CalendarDay, Listing, ListingId, ListingProjection, ListingSummary,
    NearestHigherResult, Point, QueryFilter, StatsResult,
};

pub use compute::validation;
pub use storage::{ListingStore, load_listings, parse_listings};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Catalog, CatalogBuilder, Result, StaymapError};

    pub use crate::{BoundingBox, Point};

    pub use crate::{Calendar, CalendarDay, Listing, ListingId};

    pub use crate::{ListingProjection, NearestHigherResult, QueryFilter, StatsResult};

    pub use crate::{Config, RingConfig};
}
