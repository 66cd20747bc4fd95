use crate::protocol::{NearestHigherResponse, SearchRow, StatsResponse};
use staymap::{Catalog, Result};
use staymap_types::bbox::BoundingBox;
use staymap_types::listing::ListingId;
use staymap_types::query::{ListingSummary, QueryFilter};
use std::sync::Arc;

/// Read side of the server: runs engine queries and converts results to wire types.
#[derive(Clone)]
pub struct Reader {
    catalog: Arc<Catalog>,
}

impl Reader {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn search_rectangle(
        &self,
        bbox: &BoundingBox,
        filter: &QueryFilter,
    ) -> Result<Vec<SearchRow>> {
        self.catalog
            .search_rectangle(bbox, filter)
            .map(|rows| rows.into_iter().map(SearchRow).collect())
    }

    pub fn stats(&self, bbox: &BoundingBox) -> Result<StatsResponse> {
        self.catalog.stats(bbox).map(StatsResponse::from)
    }

    pub fn nearest_higher(&self, id: ListingId) -> Result<NearestHigherResponse> {
        self.catalog
            .nearest_higher(id)
            .map(NearestHigherResponse::from)
    }

    pub fn list(&self, limit: Option<usize>) -> Vec<ListingSummary> {
        self.catalog.list(limit)
    }
}
