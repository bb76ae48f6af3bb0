//! Support ratio of a box resting on other boxes.

use crate::occupancy::OccupancyIndex;
use u_loading_core::geometry::{approx, Cuboid, EPSILON};

/// Share of `cuboid`'s footprint resting on top faces at exactly its bottom
/// height.
///
/// Boxes whose top is elsewhere are ignored. Top faces at one height cannot
/// overlap each other, so the union of the contact patches is their sum.
/// A box on the floor is fully supported.
pub fn support_ratio<'a>(cuboid: &Cuboid, others: impl IntoIterator<Item = &'a Cuboid>) -> f64 {
    let z = cuboid.min.z;
    if z <= EPSILON {
        return 1.0;
    }

    let supported: f64 = others
        .into_iter()
        .filter(|other| approx(other.top(), z))
        .map(|other| cuboid.footprint_overlap_area(other))
        .sum();

    supported / cuboid.footprint_area()
}

/// Checks the support ratio against a threshold.
pub fn is_supported<'a>(
    cuboid: &Cuboid,
    others: impl IntoIterator<Item = &'a Cuboid>,
    threshold: f64,
) -> bool {
    support_ratio(cuboid, others) >= threshold - EPSILON
}

/// Support ratio computed from an occupancy index.
pub fn support_ratio_in(cuboid: &Cuboid, index: &OccupancyIndex) -> f64 {
    if cuboid.min.z <= EPSILON {
        return 1.0;
    }
    support_ratio(cuboid, index.resting_at(cuboid.min.z))
}
