//! Availability filter: joins a requested date against a listing's calendar.
//!
//! Fail-closed: a date with no calendar entry is *not* available. A map that
//! only asks for bookable listings must never show one whose calendar is silent.

use chrono::NaiveDate;
use staymap_types::listing::Listing;

/// Whether `listing` can be booked on `date`.
#[inline]
pub fn is_available(listing: &Listing, date: NaiveDate) -> bool {
    listing.calendar.get(date).is_some_and(|day| day.available)
}

/// Nightly price that applies on `date`.
///
/// A date-specific calendar price wins over the listing's base price.
#[inline]
pub fn effective_price(listing: &Listing, date: NaiveDate) -> Option<f64> {
    listing
        .calendar
        .get(date)
        .and_then(|day| day.price)
        .or(listing.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use staymap_types::listing::{Calendar, CalendarDay};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, day).unwrap()
    }

    fn listing() -> Listing {
        let calendar = Calendar::new()
            .with_day(date(1), CalendarDay::available(Some(150.0)))
            .with_day(date(2), CalendarDay::available(None))
            .with_day(date(3), CalendarDay::blocked());
        Listing::new(1, -33.87, 151.21)
            .with_price(100.0)
            .with_calendar(calendar)
    }

    #[test]
    fn test_available_dates() {
        let listing = listing();
        assert!(is_available(&listing, date(1)));
        assert!(is_available(&listing, date(2)));
        assert!(!is_available(&listing, date(3)));
    }

    #[test]
    fn test_missing_entry_is_unavailable() {
        assert!(!is_available(&listing(), date(4)));
        assert!(!is_available(&Listing::new(2, 0.0, 0.0), date(1)));
    }

    #[test]
    fn test_effective_price() {
        let listing = listing();
        assert_eq!(effective_price(&listing, date(1)), Some(150.0));
        assert_eq!(effective_price(&listing, date(2)), Some(100.0));
        assert_eq!(effective_price(&listing, date(4)), Some(100.0));
        assert_eq!(effective_price(&Listing::new(2, 0.0, 0.0), date(1)), None);
    }
}
