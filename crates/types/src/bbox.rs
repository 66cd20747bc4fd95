use crate::geo::Point;
use geo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a set of bounds could not form a [`BoundingBox`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("{field} must be finite, got: {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    Inverted {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },
}

impl BoundsError {
    /// Name of the offending bound, as spelled in query parameters.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonFinite { field, .. } => *field,
            Self::Inverted { min_field, .. } => *min_field,
        }
    }
}

/// An axis-aligned rectangle in plain latitude/longitude space.
///
/// Bounds are inclusive. Boxes never wrap the antimeridian: they are treated
/// as simple rectangles, the way a map viewport reports its bounds.
/// This is a wrapper around `geo::Rect` (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Bounds", into = "Bounds")]
pub struct BoundingBox {
    rect: Rect,
}

/// Serialized form of a [`BoundingBox`], checked by [`BoundingBox::new`] on
/// the way in.
#[derive(Serialize, Deserialize)]
struct Bounds {
    min_lat: f64,
    min_lng: f64,
    max_lat: f64,
    max_lng: f64,
}

impl TryFrom<Bounds> for BoundingBox {
    type Error = BoundsError;

    fn try_from(b: Bounds) -> Result<Self, Self::Error> {
        Self::new(b.min_lat, b.min_lng, b.max_lat, b.max_lng)
    }
}

impl From<BoundingBox> for Bounds {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            min_lat: bbox.min_lat(),
            min_lng: bbox.min_lng(),
            max_lat: bbox.max_lat(),
            max_lng: bbox.max_lng(),
        }
    }
}

impl BoundingBox {
    /// Create a bounding box, rejecting non-finite or inverted bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use staymap_types::bbox::BoundingBox;
    ///
    /// assert!(BoundingBox::new(-33.9, 151.1, -33.8, 151.3).is_ok());
    /// assert!(BoundingBox::new(-33.8, 151.1, -33.9, 151.3).is_err());
    /// ```
    pub fn new(min_lat: f64, min_lng: f64, max_lat: f64, max_lng: f64) -> Result<Self, BoundsError> {
        for (field, value) in [
            ("min_lat", min_lat),
            ("min_lng", min_lng),
            ("max_lat", max_lat),
            ("max_lng", max_lng),
        ] {
            if !value.is_finite() {
                return Err(BoundsError::NonFinite { field, value });
            }
        }

        if min_lat > max_lat {
            return Err(BoundsError::Inverted {
                min_field: "min_lat",
                max_field: "max_lat",
                min: min_lat,
                max: max_lat,
            });
        }

        if min_lng > max_lng {
            return Err(BoundsError::Inverted {
                min_field: "min_lng",
                max_field: "max_lng",
                min: min_lng,
                max: max_lng,
            });
        }

        Ok(Self::from_rect(Rect::new(
            geo::coord! { x: min_lng, y: min_lat },
            geo::coord! { x: max_lng, y: max_lat },
        )))
    }

    fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// The whole WGS84 coordinate space.
    pub fn world() -> Self {
        Self::from_rect(Rect::new(
            geo::coord! { x: -180.0, y: -90.0 },
            geo::coord! { x: 180.0, y: 90.0 },
        ))
    }

    pub fn min_lat(&self) -> f64 {
        self.rect.min().y
    }

    pub fn min_lng(&self) -> f64 {
        self.rect.min().x
    }

    pub fn max_lat(&self) -> f64 {
        self.rect.max().y
    }

    pub fn max_lng(&self) -> f64 {
        self.rect.max().x
    }

    /// Check if a point lies within this bounding box (inclusive).
    pub fn contains_point(&self, point: &Point) -> bool {
        point.lon() >= self.min_lng()
            && point.lon() <= self.max_lng()
            && point.lat() >= self.min_lat()
            && point.lat() <= self.max_lat()
    }

    /// Check if `other` lies entirely within this bounding box.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_lng() >= self.min_lng()
            && other.max_lng() <= self.max_lng()
            && other.min_lat() >= self.min_lat()
            && other.max_lat() <= self.max_lat()
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) =
            (first.lon(), first.lat(), first.lon(), first.lat());
        for p in points {
            min_x = min_x.min(p.lon());
            min_y = min_y.min(p.lat());
            max_x = max_x.max(p.lon());
            max_y = max_y.max(p.lat());
        }
        Some(Self::from_rect(Rect::new(
            geo::coord! { x: min_x, y: min_y },
            geo::coord! { x: max_x, y: max_y },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inclusive_bounds() {
        let bbox = BoundingBox::new(-34.0, 151.0, -33.0, 152.0).unwrap();
        assert!(bbox.contains_point(&Point::new(151.0, -34.0)));
        assert!(bbox.contains_point(&Point::new(152.0, -33.0)));
        assert!(!bbox.contains_point(&Point::new(152.0001, -33.0)));
    }

    #[test]
    fn test_degenerate_box_is_allowed() {
        let bbox = BoundingBox::new(-33.5, 151.5, -33.5, 151.5).unwrap();
        assert!(bbox.contains_point(&Point::new(151.5, -33.5)));
    }

    #[test]
    fn test_inverted_bounds_name_the_field() {
        let err = BoundingBox::new(-33.0, 151.0, -34.0, 152.0).unwrap_err();
        assert_eq!(err.field(), "min_lat");

        let err = BoundingBox::new(-34.0, 152.0, -33.0, 151.0).unwrap_err();
        assert_eq!(err.field(), "min_lng");
    }

    #[test]
    fn test_non_finite_bounds() {
        let err = BoundingBox::new(-34.0, 151.0, f64::NAN, 152.0).unwrap_err();
        assert_eq!(err.field(), "max_lat");
        assert!(err.to_string().contains("finite"));
    }

    #[test]
    fn test_enclosing() {
        let points = [Point::new(151.0, -33.0), Point::new(150.0, -34.5)];
        let bbox = BoundingBox::enclosing(&points).unwrap();
        assert_eq!(bbox.min_lng(), 150.0);
        assert_eq!(bbox.max_lat(), -33.0);
        assert!(BoundingBox::enclosing(&[]).is_none());
        assert!(BoundingBox::world().contains_box(&bbox));
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let bbox: BoundingBox = serde_json::from_str(
            r#"{"min_lat": -34.0, "min_lng": 151.0, "max_lat": -33.0, "max_lng": 152.0}"#,
        )
        .unwrap();
        assert_eq!(bbox, BoundingBox::new(-34.0, 151.0, -33.0, 152.0).unwrap());
        assert_eq!(
            serde_json::to_value(bbox).unwrap()["max_lng"],
            serde_json::json!(152.0)
        );

        let err = serde_json::from_str::<BoundingBox>(
            r#"{"min_lat": -33.0, "min_lng": 151.0, "max_lat": -34.0, "max_lng": 152.0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("min_lat"));
    }
}
