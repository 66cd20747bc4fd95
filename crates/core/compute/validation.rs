//! Validation for coordinates, listing records and query filters.

use crate::error::{Result, StaymapError};
use staymap_types::geo::Point;
use staymap_types::listing::Listing;
use staymap_types::query::QueryFilter;

/// Validates a point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use staymap::compute::validation::validate_geographic_point;
/// use staymap_types::geo::Point;
///
/// let sydney = Point::new(151.2093, -33.8688);
/// assert!(validate_geographic_point(&sydney).is_ok());
///
/// let invalid = Point::new(151.2, -95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.lon(), point.lat());

    if !x.is_finite() {
        return Err(StaymapError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(StaymapError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(StaymapError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(StaymapError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a listing before it enters the store.
///
/// Position must be a valid coordinate; a present rating must be finite and a
/// present price (base or per-day) must be finite and non-negative.
pub fn validate_listing(listing: &Listing) -> Result<()> {
    validate_geographic_point(&listing.position())
        .map_err(|e| StaymapError::Dataset(format!("listing {}: {}", listing.id, e)))?;

    if let Some(rating) = listing.rating
        && !rating.is_finite()
    {
        return Err(StaymapError::Dataset(format!(
            "listing {}: rating must be finite, got: {}",
            listing.id, rating
        )));
    }

    let day_prices = listing.calendar.iter().filter_map(|(_, day)| day.price);
    for price in listing.price.into_iter().chain(day_prices) {
        if !(price.is_finite() && price >= 0.0) {
            return Err(StaymapError::Dataset(format!(
                "listing {}: price must be finite and non-negative, got: {}",
                listing.id, price
            )));
        }
    }

    Ok(())
}

/// Validates the numeric parts of a search filter.
///
/// `min_rating` must be finite and >= 0; `max_price` must be >= 0 and may be
/// `+inf` (unbounded).
pub fn validate_filter(filter: &QueryFilter) -> Result<()> {
    if !(filter.min_rating.is_finite() && filter.min_rating >= 0.0) {
        return Err(StaymapError::invalid_parameter(
            "min_rating",
            format!("must be a finite number >= 0, got: {}", filter.min_rating),
        ));
    }

    if filter.max_price.is_nan() || filter.max_price < 0.0 {
        return Err(StaymapError::invalid_parameter(
            "max_price",
            format!("must be a number >= 0, got: {}", filter.max_price),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staymap_types::listing::{Calendar, CalendarDay};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 15).unwrap()
    }

    #[test]
    fn test_validate_geographic_point() {
        assert!(validate_geographic_point(&Point::new(0.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(180.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(180.1, 0.0)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_validate_listing_rejects_bad_position() {
        let listing = Listing::new(1, 91.0, 0.0);
        let err = validate_listing(&listing).unwrap_err();
        assert!(err.to_string().contains("listing 1"));
    }

    #[test]
    fn test_validate_listing_rejects_negative_day_price() {
        let calendar = Calendar::new().with_day(day(), CalendarDay::available(Some(-5.0)));
        let listing = Listing::new(2, -33.8, 151.2).with_calendar(calendar);
        assert!(validate_listing(&listing).is_err());
    }

    #[test]
    fn test_validate_listing_accepts_zero_price() {
        let listing = Listing::new(3, -33.8, 151.2).with_price(0.0).with_rating(0.0);
        assert!(validate_listing(&listing).is_ok());
    }

    #[test]
    fn test_validate_filter() {
        assert!(validate_filter(&QueryFilter::on(day())).is_ok());

        let err = validate_filter(&QueryFilter::on(day()).with_min_rating(-1.0)).unwrap_err();
        assert_eq!(err.field(), Some("min_rating"));

        let err = validate_filter(&QueryFilter::on(day()).with_max_price(f64::NAN)).unwrap_err();
        assert_eq!(err.field(), Some("max_price"));
    }
}
