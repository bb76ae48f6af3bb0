//! Layout validation.

use crate::occupancy::OccupancyIndex;
use crate::support::support_ratio_in;
use u_loading_core::geometry::{Cuboid, EPSILON};
use u_loading_core::{Container, Error, PackingResult, Result};

/// Checks the layout invariants of a packing.
///
/// Every placed box lies inside the container, no two boxes overlap, every
/// box above the floor rests on at least `threshold` of its footprint and the
/// load orders form a permutation of `1..=N`. Returns the first violation.
pub fn validate_layout(result: &PackingResult, container: &Container, threshold: f64) -> Result<()> {
    let boxes: Vec<Cuboid> = result.placed.iter().map(|p| p.cuboid()).collect();

    for (p, cuboid) in result.placed.iter().zip(&boxes) {
        if !container.contains(cuboid) {
            return Err(Error::Internal(format!(
                "item {} at ({:.3}, {:.3}, {:.3}) leaves the container",
                p.item_id, p.position.x, p.position.y, p.position.z
            )));
        }
    }

    let mut index = OccupancyIndex::new();
    for (p, cuboid) in result.placed.iter().zip(&boxes) {
        if let Some(other) = index.first_overlap(cuboid) {
            return Err(Error::Internal(format!(
                "item {} overlaps the box at ({:.3}, {:.3}, {:.3})",
                p.item_id, other.min.x, other.min.y, other.min.z
            )));
        }
        index.insert(*cuboid);
    }

    for (p, cuboid) in result.placed.iter().zip(&boxes) {
        let ratio = support_ratio_in(cuboid, &index);
        if ratio < threshold - EPSILON {
            return Err(Error::Internal(format!(
                "item {} is supported on {:.1}% of its footprint (required {:.1}%)",
                p.item_id,
                ratio * 100.0,
                threshold * 100.0
            )));
        }
    }

    let n = result.placed.len();
    let mut seen = vec![false; n];
    for p in &result.placed {
        if p.load_order == 0 || p.load_order > n || seen[p.load_order - 1] {
            return Err(Error::Internal(format!(
                "load order {} of item {} is not a permutation of 1..={}",
                p.load_order, p.item_id, n
            )));
        }
        seen[p.load_order - 1] = true;
    }

    Ok(())
}
