//! # staymap-types
//!
//! Core value types for the staymap listing query engine.
//!
//! - **Geometry**: `Point` (lng/lat with haversine distance), `BoundingBox`
//! - **Listings**: `ListingId`, `Listing`, `Calendar`, `CalendarDay`
//! - **Queries**: `QueryFilter`, `ListingProjection`, `StatsResult`,
//!   `NearestHigherResult`, `ListingSummary`
//!
//! All types are serializable with Serde. Coordinates are plain WGS84 degrees;
//! longitude is the x axis and latitude the y axis, as in the `geo` crate.
//!
//! ## Examples
//!
//! ```rust
//! use staymap_types::bbox::BoundingBox;
//! use staymap_types::geo::Point;
//!
//! let sydney_cbd = BoundingBox::new(-33.88, 151.19, -33.85, 151.22).unwrap();
//! let opera_house = Point::new(151.2153, -33.8568);
//! assert!(sydney_cbd.contains_point(&opera_house));
//! ```

pub mod bbox;
pub mod geo;
pub mod listing;
pub mod query;

pub use bbox::{BoundingBox, BoundsError};
pub use geo::Point;
pub use listing::{Calendar, CalendarDay, Listing, ListingId};
pub use query::{
    ListingProjection, ListingSummary, NearestHigherResult, QueryFilter, StatsResult,
};
