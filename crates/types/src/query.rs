//! Query inputs and result records.

use crate::listing::{Listing, ListingId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filters applied by a rectangle search. Immutable per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Calendar day the listing must be bookable on.
    pub date: NaiveDate,
    /// Inclusive lower bound on rating. Unrated listings never pass.
    pub min_rating: f64,
    /// Inclusive upper bound on the nightly price. Unpriced listings never pass.
    pub max_price: f64,
}

impl QueryFilter {
    /// Filter on a date with no rating or price constraint.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            min_rating: 0.0,
            max_price: f64::INFINITY,
        }
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = max_price;
        self
    }
}

/// Everything a consumer needs to render a listing, null fields included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingProjection {
    pub id: ListingId,
    pub listing_url: Option<String>,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub neighborhood: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub accommodates: Option<u32>,
    pub review_scores_rating: Option<f64>,
    /// GeoJSON point derived from longitude/latitude.
    pub geom: geojson::Geometry,
    pub price: Option<f64>,
}

impl ListingProjection {
    /// Project a listing, reporting `price` as the price that applies to the query.
    pub fn from_listing(listing: &Listing, price: Option<f64>) -> Self {
        Self {
            id: listing.id,
            listing_url: listing.listing_url.clone(),
            name: listing.name.clone(),
            summary: listing.summary.clone(),
            description: listing.description.clone(),
            neighborhood: listing.neighborhood.clone(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            accommodates: listing.accommodates,
            review_scores_rating: listing.rating,
            geom: geojson::Geometry::new(geojson::Value::Point(vec![
                listing.longitude,
                listing.latitude,
            ])),
            price,
        }
    }
}

/// Aggregate over every listing inside a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    /// Mean over rated listings; `None` when nothing in the box is rated.
    pub avg_rating: Option<f64>,
    pub listing_count: usize,
}

/// The nearest strictly-higher-rated listing and its distance from the reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestHigherResult {
    pub listing: ListingProjection,
    /// Great-circle distance in meters, unrounded.
    pub distance_meters: f64,
}

/// Lightweight listing preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
}

impl From<&Listing> for ListingSummary {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            lon: listing.longitude,
            lat: listing.latitude,
        }
    }
}
