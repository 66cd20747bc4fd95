//! Wire types for the staymap HTTP API
//!
//! Search rows are positional arrays, the shape the map client indexes into.
//! Everything else is a JSON object.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use staymap_types::query::{ListingProjection, NearestHigherResult, StatsResult};

/// Column order of a search row.
pub const SEARCH_ROW_COLUMNS: [&str; 12] = [
    "id",
    "listing_url",
    "name",
    "summary",
    "description",
    "neighborhood",
    "latitude",
    "longitude",
    "accommodates",
    "review_scores_rating",
    "geom",
    "price",
];

/// One `/api/search_rectangle` result, serialized as a 12-element array.
#[derive(Debug, Clone)]
pub struct SearchRow(pub ListingProjection);

impl Serialize for SearchRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let p = &self.0;
        let mut row = serializer.serialize_tuple(SEARCH_ROW_COLUMNS.len())?;
        row.serialize_element(&p.id)?;
        row.serialize_element(&p.listing_url)?;
        row.serialize_element(&p.name)?;
        row.serialize_element(&p.summary)?;
        row.serialize_element(&p.description)?;
        row.serialize_element(&p.neighborhood)?;
        row.serialize_element(&p.latitude)?;
        row.serialize_element(&p.longitude)?;
        row.serialize_element(&p.accommodates)?;
        row.serialize_element(&p.review_scores_rating)?;
        row.serialize_element(&p.geom)?;
        row.serialize_element(&p.price)?;
        row.end()
    }
}

/// `/api/nearest_higher/{id}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestHigherResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
    pub review_scores_rating: Option<f64>,
    pub distance_meters: f64,
    pub listing_url: Option<String>,
}

impl From<NearestHigherResult> for NearestHigherResponse {
    fn from(result: NearestHigherResult) -> Self {
        let listing = result.listing;
        Self {
            latitude: listing.latitude,
            longitude: listing.longitude,
            name: listing.name,
            review_scores_rating: listing.review_scores_rating,
            distance_meters: result.distance_meters,
            listing_url: listing.listing_url,
        }
    }
}

/// `/api/stats` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub avg_rating: Option<f64>,
    pub listing_count: usize,
}

impl From<StatsResult> for StatsResponse {
    fn from(stats: StatsResult) -> Self {
        Self {
            avg_rating: stats.avg_rating,
            listing_count: stats.listing_count,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Offending query parameter, for validation errors about one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use staymap_types::listing::Listing;

    #[test]
    fn test_search_row_is_positional() {
        let listing = Listing::new(11156, -33.86917, 151.22656)
            .with_name("An Oasis in the City")
            .with_rating(92.0);
        let row = SearchRow(ListingProjection::from_listing(&listing, Some(65.0)));

        let value = serde_json::to_value(&row).unwrap();
        let columns = value.as_array().unwrap();
        assert_eq!(columns.len(), SEARCH_ROW_COLUMNS.len());
        assert_eq!(columns[0], 11156);
        assert_eq!(columns[1], serde_json::Value::Null);
        assert_eq!(columns[2], "An Oasis in the City");
        assert_eq!(columns[6], -33.86917);
        assert_eq!(columns[7], 151.22656);
        assert_eq!(columns[9], 92.0);
        assert_eq!(columns[10]["type"], "Point");
        assert_eq!(columns[10]["coordinates"][0], 151.22656);
        assert_eq!(columns[11], 65.0);
    }

    #[test]
    fn test_error_body_omits_missing_parameter() {
        let body = ErrorBody {
            error: "no such listing".to_string(),
            parameter: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"no such listing"}"#
        );
    }
}
