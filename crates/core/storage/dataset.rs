//! Dataset loading.
//!
//! A dataset is either a JSON array of listings or, for `.jsonl`/`.ndjson`
//! files, one listing object per line. Field names follow the source listing
//! columns (`review_scores_rating`, `neighborhood_overview`, ...).

use crate::error::{Result, StaymapError};
use staymap_types::listing::Listing;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load listings from a dataset file.
pub fn load_listings<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        StaymapError::Dataset(format!("cannot open {}: {}", path.display(), e))
    })?;

    let line_delimited = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl" | "ndjson")
    );

    let listings = if line_delimited {
        read_lines(BufReader::new(file))?
    } else {
        serde_json::from_reader(BufReader::new(file))?
    };

    log::info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Parse a JSON array of listings.
pub fn parse_listings(json: &str) -> Result<Vec<Listing>> {
    Ok(serde_json::from_str(json)?)
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<Listing>> {
    let mut listings = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let listing = serde_json::from_str(&line).map_err(|e| {
            StaymapError::Dataset(format!("line {}: {}", number + 1, e))
        })?;
        listings.push(listing);
    }
    Ok(listings)
}
