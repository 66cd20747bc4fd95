//! Nearest listing with a strictly higher rating than a reference listing.

use super::snapshot::Snapshot;
use crate::error::{Result, StaymapError};
use crate::storage::Slot;
use staymap_types::listing::ListingId;
use staymap_types::query::{ListingProjection, NearestHigherResult};

impl Snapshot {
    /// Closest other listing rated strictly above listing `id`.
    ///
    /// Distance is great-circle over the listing coordinates. Listings tied
    /// on distance resolve to the lowest id. The projection carries the
    /// listing's base price.
    pub fn nearest_higher(&self, id: ListingId) -> Result<NearestHigherResult> {
        let reference_slot = self
            .store
            .slot_of(id)
            .ok_or_else(|| StaymapError::NotFound("no such listing".to_string()))?;
        let reference = self.listing_at(reference_slot)?;

        let reference_rating = reference.rating.ok_or_else(|| {
            StaymapError::invalid_parameter(
                "review_scores_rating",
                format!("listing {} has no rating to compare against", id),
            )
        })?;

        let mut unknown_slot: Option<Slot> = None;
        let outcome = self
            .index
            .nearest_matching(&reference.position(), |slot| {
                if slot == reference_slot {
                    return false;
                }
                match self.store.by_slot(slot) {
                    Some(candidate) => candidate.rating.is_some_and(|r| r > reference_rating),
                    None => {
                        unknown_slot.get_or_insert(slot);
                        false
                    }
                }
            });

        if let Some(slot) = unknown_slot {
            log::error!("spatial index returned unknown slot {}", slot);
            return Err(StaymapError::Index(format!("slot {} not in store", slot)));
        }

        log::debug!(
            "nearest_higher({}): {} rounds, final radius {:.1} m",
            id,
            outcome.rounds,
            outcome.final_radius_m
        );

        let neighbor = outcome.nearest.ok_or_else(|| {
            StaymapError::NotFound("no higher-rated listing found".to_string())
        })?;
        let listing = self.listing_at(neighbor.slot)?;

        Ok(NearestHigherResult {
            listing: ListingProjection::from_listing(listing, listing.price),
            distance_meters: neighbor.distance_m,
        })
    }
}
