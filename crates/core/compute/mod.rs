//! Spatial indexing, availability filtering, and validation.

pub mod availability;
pub mod spatial;
pub mod validation;
