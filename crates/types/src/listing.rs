//! Lodging listing records.

use crate::geo::Point;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque, unique, immutable listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListingId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for ListingId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub available: bool,
    /// Date-specific nightly price; falls back to the listing's base price.
    #[serde(default)]
    pub price: Option<f64>,
}

impl CalendarDay {
    pub fn available(price: Option<f64>) -> Self {
        Self {
            available: true,
            price,
        }
    }

    pub fn blocked() -> Self {
        Self {
            available: false,
            price: None,
        }
    }
}

/// Per-date availability, keyed by calendar day.
///
/// Serialized as a JSON object keyed by ISO dates (`"2019-01-15"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, CalendarDay>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.get(&date)
    }

    /// Builder-style insert.
    pub fn with_day(mut self, date: NaiveDate, day: CalendarDay) -> Self {
        self.days.insert(date, day);
        self
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &CalendarDay)> {
        self.days.iter()
    }
}

/// A lodging listing.
///
/// Latitude/longitude are the source of truth for position; the GeoJSON
/// geometry exposed in projections is derived from them. Rating and price are
/// tri-state: `None` means unknown, which is never conflated with zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default)]
    pub listing_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "neighborhood_overview")]
    pub neighborhood: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accommodates: Option<u32>,
    #[serde(default, rename = "review_scores_rating")]
    pub rating: Option<f64>,
    /// Base nightly price.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub calendar: Calendar,
}

impl Listing {
    /// A listing with only identity and position set.
    pub fn new(id: impl Into<ListingId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            listing_url: None,
            name: None,
            summary: None,
            description: None,
            neighborhood: None,
            latitude,
            longitude,
            accommodates: None,
            rating: None,
            price: None,
            calendar: Calendar::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Position as a lng/lat point.
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}
