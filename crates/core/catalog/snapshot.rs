//! Immutable listing store + spatial index pair, and the range/stats queries.

use crate::compute::availability::{effective_price, is_available};
use crate::compute::spatial::SpatialIndex;
use crate::compute::validation::validate_filter;
use crate::config::Config;
use crate::error::{Result, StaymapError};
use crate::storage::{ListingStore, Slot};
use staymap_types::bbox::BoundingBox;
use staymap_types::listing::{Listing, ListingId};
use staymap_types::query::{ListingProjection, ListingSummary, QueryFilter, StatsResult};

/// A fully built, read-only view of the listings.
///
/// Never mutated after construction, so it can be shared across request
/// handlers without locking. A dataset refresh builds a new snapshot.
#[derive(Debug)]
pub struct Snapshot {
    pub(crate) store: ListingStore,
    pub(crate) index: SpatialIndex,
    pub(crate) config: Config,
}

impl Snapshot {
    /// Validate `listings` and build the store and its spatial index.
    pub fn build(listings: Vec<Listing>, config: Config) -> Result<Self> {
        config.validate().map_err(StaymapError::Config)?;

        let store = ListingStore::new(listings)?;
        let index = SpatialIndex::build(&store, config.ring);
        if index.len() != store.len() {
            return Err(StaymapError::Index(format!(
                "indexed {} of {} listings",
                index.len(),
                store.len()
            )));
        }

        log::info!("Built snapshot with {} listings", store.len());
        Ok(Self {
            store,
            index,
            config,
        })
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.store.get(id)
    }

    /// Listings inside `bbox` that are bookable on `filter.date`, rated at
    /// least `filter.min_rating` and priced at most `filter.max_price`.
    ///
    /// Unrated or unpriced listings never pass. Results are in id order.
    pub fn search_rectangle(
        &self,
        bbox: &BoundingBox,
        filter: &QueryFilter,
    ) -> Result<Vec<ListingProjection>> {
        validate_filter(filter)?;

        let candidates = self.index.query_bbox(bbox);
        let mut results = Vec::new();

        for slot in candidates.iter().copied() {
            let listing = self.listing_at(slot)?;

            if !is_available(listing, filter.date) {
                continue;
            }

            if !listing.rating.is_some_and(|r| r >= filter.min_rating) {
                continue;
            }

            let price = effective_price(listing, filter.date);
            if !price.is_some_and(|p| p <= filter.max_price) {
                continue;
            }

            results.push(ListingProjection::from_listing(listing, price));
        }

        log::debug!(
            "search_rectangle: {} candidates, {} matches",
            candidates.len(),
            results.len()
        );
        Ok(results)
    }

    /// Count every listing inside `bbox` and average the ratings of the rated ones.
    ///
    /// No date, rating, or price filter applies.
    pub fn stats(&self, bbox: &BoundingBox) -> Result<StatsResult> {
        let slots = self.index.query_bbox(bbox);

        let mut rated = 0usize;
        let mut rating_sum = 0.0;
        for slot in slots.iter().copied() {
            if let Some(rating) = self.listing_at(slot)?.rating {
                rated += 1;
                rating_sum += rating;
            }
        }

        Ok(StatsResult {
            avg_rating: (rated > 0).then(|| rating_sum / rated as f64),
            listing_count: slots.len(),
        })
    }

    /// Up to `limit` listing previews in id order.
    ///
    /// `None` uses the configured default; requests are capped at the configured maximum.
    pub fn list(&self, limit: Option<usize>) -> Vec<ListingSummary> {
        let limit = limit
            .unwrap_or(self.config.default_list_limit)
            .min(self.config.max_list_limit);

        self.store
            .iter()
            .take(limit)
            .map(|(_, listing)| ListingSummary::from(listing))
            .collect()
    }

    pub(crate) fn listing_at(&self, slot: Slot) -> Result<&Listing> {
        self.store.by_slot(slot).ok_or_else(|| {
            log::error!("spatial index returned unknown slot {}", slot);
            StaymapError::Index(format!("slot {} not in store", slot))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use staymap_types::listing::{Calendar, CalendarDay};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 15).unwrap()
    }

    fn open(price: Option<f64>) -> Calendar {
        Calendar::new().with_day(day(), CalendarDay::available(price))
    }

    fn snapshot() -> Snapshot {
        Snapshot::build(
            vec![
                Listing::new(1, -33.8688, 151.2093)
                    .with_rating(95.0)
                    .with_price(120.0)
                    .with_calendar(open(None)),
                Listing::new(2, -33.8568, 151.2153)
                    .with_rating(80.0)
                    .with_price(300.0)
                    .with_calendar(open(Some(90.0))),
                // Unrated but available and cheap.
                Listing::new(3, -33.8700, 151.2100)
                    .with_price(50.0)
                    .with_calendar(open(None)),
                // Rated, no price anywhere.
                Listing::new(4, -33.8650, 151.2050)
                    .with_rating(70.0)
                    .with_calendar(open(None)),
                // Blocked on the day.
                Listing::new(5, -33.8690, 151.2080)
                    .with_rating(99.0)
                    .with_price(10.0)
                    .with_calendar(Calendar::new().with_day(day(), CalendarDay::blocked())),
                // Outside the CBD box.
                Listing::new(6, -33.8915, 151.2767)
                    .with_rating(100.0)
                    .with_price(10.0)
                    .with_calendar(open(None)),
            ],
            Config::default(),
        )
        .unwrap()
    }

    fn cbd() -> BoundingBox {
        BoundingBox::new(-33.88, 151.19, -33.85, 151.22).unwrap()
    }

    fn ids(results: &[ListingProjection]) -> Vec<u64> {
        results.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_search_unconstrained() {
        let results = snapshot()
            .search_rectangle(&cbd(), &QueryFilter::on(day()))
            .unwrap();
        // 3 is unrated, 4 unpriced, 5 blocked, 6 outside.
        assert_eq!(ids(&results), vec![1, 2]);
    }

    #[test]
    fn test_search_uses_day_price() {
        let filter = QueryFilter::on(day()).with_max_price(100.0);
        let results = snapshot().search_rectangle(&cbd(), &filter).unwrap();
        assert_eq!(ids(&results), vec![2]);
        assert_eq!(results[0].price, Some(90.0));
    }

    #[test]
    fn test_search_min_rating_inclusive() {
        let filter = QueryFilter::on(day()).with_min_rating(95.0);
        let results = snapshot().search_rectangle(&cbd(), &filter).unwrap();
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn test_search_other_date_is_empty() {
        let other = NaiveDate::from_ymd_opt(2019, 2, 1).unwrap();
        let results = snapshot()
            .search_rectangle(&cbd(), &QueryFilter::on(other))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_rejects_bad_filter() {
        let filter = QueryFilter::on(day()).with_min_rating(f64::NAN);
        let err = snapshot().search_rectangle(&cbd(), &filter).unwrap_err();
        assert_eq!(err.field(), Some("min_rating"));
    }

    #[test]
    fn test_stats_counts_everything_in_box() {
        let stats = snapshot().stats(&cbd()).unwrap();
        assert_eq!(stats.listing_count, 5);
        // Ratings 95, 80, 70, 99; listing 3 is unrated.
        assert_eq!(stats.avg_rating, Some((95.0 + 80.0 + 70.0 + 99.0) / 4.0));
    }

    #[test]
    fn test_stats_empty_box() {
        let empty = BoundingBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let stats = snapshot().stats(&empty).unwrap();
        assert_eq!(stats.listing_count, 0);
        assert_eq!(stats.avg_rating, None);
    }

    #[test]
    fn test_stats_unrated_box() {
        let only_three = BoundingBox::new(-33.8700, 151.2100, -33.8700, 151.2100).unwrap();
        let stats = snapshot().stats(&only_three).unwrap();
        assert_eq!(stats.listing_count, 1);
        assert_eq!(stats.avg_rating, None);
    }

    #[test]
    fn test_list_limits() {
        let snapshot = snapshot();
        assert_eq!(snapshot.list(None).len(), 6);

        let two = snapshot.list(Some(2));
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].id, ListingId(1));
        assert_eq!(two[1].lat, -33.8568);
    }

    #[test]
    fn test_list_capped_by_config() {
        let snapshot = Snapshot::build(
            (1..=20).map(|i| Listing::new(i, 0.0, 0.0)).collect(),
            Config::default().with_list_limits(5, 10),
        )
        .unwrap();
        assert_eq!(snapshot.list(None).len(), 5);
        assert_eq!(snapshot.list(Some(50)).len(), 10);
    }

    #[test]
    fn test_build_rejects_bad_config() {
        let config = Config::default().with_list_limits(10, 0);
        let err = Snapshot::build(Vec::new(), config).unwrap_err();
        assert!(matches!(err, StaymapError::Config(_)));
    }
}
