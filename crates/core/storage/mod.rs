//! Listing storage: the in-memory listing store and the dataset loader.

mod dataset;
mod memory;

pub use dataset::{load_listings, parse_listings};
pub use memory::{ListingStore, Slot};
