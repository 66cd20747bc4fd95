//! Expanding-ring nearest-neighbor search with an admissibility predicate.
//!
//! A plain nearest-neighbor iterator degrades to a full scan when admissible
//! listings are sparse: every rejected neighbor is visited in distance order.
//! Ring search instead looks at successively larger great-circle radii around
//! the center, asking the source only for what lies in each ring's envelope.
//!
//! Each round:
//! 1. builds a lat/lng window that fully encloses the circle of `radius`,
//! 2. keeps admissible candidates whose haversine distance is within `radius`,
//! 3. returns the best one once it is confirmed, i.e. no unvisited listing can
//!    be closer or tied with it,
//! 4. otherwise multiplies the radius by the growth factor.
//!
//! The search stops with no result once a window covers the whole source extent
//! without meeting any admissible candidate, or once the radius reaches half the
//! earth's circumference, where every point on the sphere is inside the circle.

use crate::config::RingConfig;
use crate::storage::Slot;
use staymap_types::bbox::BoundingBox;
use staymap_types::geo::{EARTH_RADIUS_M, Point};
use std::f64::consts::PI;

/// Largest possible great-circle distance: half the earth's circumference.
pub const MAX_RADIUS_M: f64 = PI * EARTH_RADIUS_M;

/// Something ring search can ask for candidates.
pub trait RingSource {
    /// Call `visit` for every indexed position inside `window` (inclusive).
    fn visit_window(&self, window: &BoundingBox, visit: &mut dyn FnMut(Slot, Point));

    /// Box enclosing every indexed position, `None` when empty.
    fn extent(&self) -> Option<BoundingBox>;
}

/// An admissible candidate and its distance from the search center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub slot: Slot,
    pub distance_m: f64,
}

/// Result of a ring search, with the work it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingOutcome {
    pub nearest: Option<Neighbor>,
    pub rounds: usize,
    pub final_radius_m: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RingSearch {
    config: RingConfig,
}

impl RingSearch {
    pub fn new(config: RingConfig) -> Self {
        Self { config }
    }

    /// Find the admissible candidate nearest to `center`.
    ///
    /// Candidates within `tie_tolerance_m` of the closest one are tied; the
    /// lowest slot wins. Always terminates.
    pub fn run<S, F>(&self, source: &S, center: &Point, mut admissible: F) -> RingOutcome
    where
        S: RingSource + ?Sized,
        F: FnMut(Slot) -> bool,
    {
        let tolerance = self.config.tie_tolerance_m;
        let extent = source.extent();
        let mut radius = self.config.initial_radius_m.min(MAX_RADIUS_M);
        let mut rounds = 0;

        loop {
            rounds += 1;
            let exhaustive = radius >= MAX_RADIUS_M;
            let window = if exhaustive {
                BoundingBox::world()
            } else {
                window_around(center, radius)
            };

            let mut candidates: Vec<Neighbor> = Vec::new();
            let mut admissible_seen = false;

            source.visit_window(&window, &mut |slot, position| {
                if !admissible(slot) {
                    return;
                }
                admissible_seen = true;

                let distance_m = center.haversine_distance(&position);
                if !distance_m.is_finite() || (!exhaustive && distance_m > radius) {
                    return;
                }
                candidates.push(Neighbor { slot, distance_m });
            });

            if let Some((closest_m, found)) = pick(&candidates, tolerance)
                && (exhaustive || closest_m + tolerance <= radius)
            {
                log::debug!(
                    "ring search hit slot {} at {:.1} m after {} rounds",
                    found.slot,
                    found.distance_m,
                    rounds
                );
                return RingOutcome {
                    nearest: Some(found),
                    rounds,
                    final_radius_m: radius,
                };
            }

            let covers_all = extent.is_none_or(|e| window.contains_box(&e));
            if exhaustive || (covers_all && !admissible_seen) {
                log::debug!("ring search exhausted after {} rounds", rounds);
                return RingOutcome {
                    nearest: None,
                    rounds,
                    final_radius_m: radius,
                };
            }

            radius = (radius * self.config.growth_factor).min(MAX_RADIUS_M);
        }
    }
}

/// Lowest slot among the candidates within `tolerance` of the closest one,
/// with the closest distance. Independent of visit order.
fn pick(candidates: &[Neighbor], tolerance: f64) -> Option<(f64, Neighbor)> {
    let closest_m = candidates
        .iter()
        .map(|n| n.distance_m)
        .min_by(f64::total_cmp)?;

    candidates
        .iter()
        .filter(|n| n.distance_m <= closest_m + tolerance)
        .min_by_key(|n| n.slot)
        .map(|n| (closest_m, *n))
}

/// Smallest lat/lng window enclosing the great-circle disc of `radius_m`.
///
/// Latitude spans `lat ± δ` for angular radius δ. The longitude half-width at
/// latitude φ is `asin(sin δ / cos φ)`, which is wider than `δ / cos φ`. If the
/// disc reaches a pole or crosses the antimeridian, the window spans every
/// longitude instead.
pub fn window_around(center: &Point, radius_m: f64) -> BoundingBox {
    // Slightly inflated so rounding never shrinks the window below the disc.
    let delta = radius_m / EARTH_RADIUS_M * (1.0 + 1e-9);
    if delta >= PI {
        return BoundingBox::world();
    }

    let delta_deg = delta.to_degrees();
    let lo_lat = center.lat() - delta_deg;
    let hi_lat = center.lat() + delta_deg;

    let (min_lng, max_lng) = if lo_lat > -90.0 && hi_lat < 90.0 {
        let cos_lat = center.lat().to_radians().cos();
        let half_width = (delta.sin() / cos_lat).min(1.0).asin().to_degrees();
        let (lo, hi) = (center.lon() - half_width, center.lon() + half_width);
        if lo < -180.0 || hi > 180.0 {
            (-180.0, 180.0)
        } else {
            (lo, hi)
        }
    } else {
        (-180.0, 180.0)
    };

    // Only a non-finite center can fail here; the world window still encloses it.
    BoundingBox::new(lo_lat.max(-90.0), min_lng, hi_lat.min(90.0), max_lng)
        .unwrap_or_else(|_| BoundingBox::world())
}
