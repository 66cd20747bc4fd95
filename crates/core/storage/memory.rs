//! In-memory listing store.
//!
//! Owns every listing record for the lifetime of a snapshot. Listings are kept
//! sorted by id, so a slot order comparison is an id order comparison.

use crate::compute::validation::validate_listing;
use crate::error::{Result, StaymapError};
use rustc_hash::FxHashMap;
use staymap_types::listing::{Listing, ListingId};

/// Position of a listing inside the store. Slots ascend with listing ids.
pub type Slot = u32;

#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    slots: FxHashMap<ListingId, Slot>,
}

impl ListingStore {
    /// Build a store, validating every listing and rejecting duplicate ids.
    pub fn new(mut listings: Vec<Listing>) -> Result<Self> {
        if listings.len() > Slot::MAX as usize {
            return Err(StaymapError::Dataset(format!(
                "too many listings: {}",
                listings.len()
            )));
        }

        for listing in &listings {
            validate_listing(listing)?;
        }

        listings.sort_unstable_by_key(|l| l.id);

        let mut slots = FxHashMap::default();
        slots.reserve(listings.len());
        for (slot, listing) in listings.iter().enumerate() {
            if slots.insert(listing.id, slot as Slot).is_some() {
                return Err(StaymapError::Dataset(format!(
                    "duplicate listing id {}",
                    listing.id
                )));
            }
        }

        Ok(Self { listings, slots })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.slot_of(id).and_then(|slot| self.by_slot(slot))
    }

    pub fn slot_of(&self, id: ListingId) -> Option<Slot> {
        self.slots.get(&id).copied()
    }

    pub fn by_slot(&self, slot: Slot) -> Option<&Listing> {
        self.listings.get(slot as usize)
    }

    /// Listings in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Listing)> {
        self.listings
            .iter()
            .enumerate()
            .map(|(slot, listing)| (slot as Slot, listing))
    }
}
