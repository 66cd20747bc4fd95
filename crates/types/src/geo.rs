//! Wrapped point type from the `geo` crate with great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, matching the radius `geo::Haversine` uses.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A geographic point with longitude/latitude coordinates.
///
/// This wraps `geo::Point` and keeps the x = longitude, y = latitude convention.
///
/// # Examples
///
/// ```
/// use staymap_types::geo::Point;
///
/// let sydney = Point::new(151.2093, -33.8688);
/// assert_eq!(sydney.lon(), 151.2093);
/// assert_eq!(sydney.lat(), -33.8688);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    inner: geo::Point<f64>,
}

impl Point {
    /// Create a new point from longitude (x) and latitude (y).
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            inner: geo::Point::new(lon, lat),
        }
    }

    /// Get the longitude.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.inner.x()
    }

    /// Get the latitude.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    /// Great-circle distance to another point in meters.
    ///
    /// Uses the haversine formula, which accounts for the earth's curvature.
    /// Plain Euclidean distance on degrees is never used: a degree of longitude
    /// shrinks towards the poles while a degree of latitude does not.
    ///
    /// # Examples
    ///
    /// ```
    /// use staymap_types::geo::Point;
    ///
    /// let sydney = Point::new(151.2093, -33.8688);
    /// let melbourne = Point::new(144.9631, -37.8136);
    /// let distance = sydney.haversine_distance(&melbourne);
    /// assert!(distance > 700_000.0 && distance < 720_000.0);
    /// ```
    #[inline]
    pub fn haversine_distance(&self, other: &Point) -> f64 {
        use geo::Distance;
        geo::Haversine.distance(self.inner, other.inner)
    }
}
