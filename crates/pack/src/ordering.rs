//! Item orderings explored by the optimizer.

use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use u_loading_core::{Item, OrderingStrategy};

fn volume_desc(a: &Item, b: &Item) -> Ordering {
    b.volume().partial_cmp(&a.volume()).unwrap_or(Ordering::Equal)
}

/// Returns the items in the order the strategy prescribes.
///
/// Sorting is stable: items that compare equal keep their input order.
/// Only [`OrderingStrategy::ZoneShuffled`] draws from `rng`.
pub fn order_items<'a, R: Rng>(
    items: &'a [Item],
    strategy: OrderingStrategy,
    rng: &mut R,
) -> Vec<&'a Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();

    match strategy {
        OrderingStrategy::ZoneShuffled => {
            ordered.sort_by(|a, b| a.zone().cmp(b.zone()));
            for group in ordered.chunk_by_mut(|a, b| a.zone() == b.zone()) {
                group.shuffle(rng);
            }
        }
        OrderingStrategy::MaxDimensionDescending => {
            ordered.sort_by(|a, b| {
                b.max_dimension()
                    .partial_cmp(&a.max_dimension())
                    .unwrap_or(Ordering::Equal)
            });
        }
        OrderingStrategy::ZoneDescendingVolumeDescending => {
            ordered.sort_by(|a, b| b.zone().cmp(a.zone()).then_with(|| volume_desc(a, b)));
        }
        OrderingStrategy::ZoneAscendingVolumeDescending => {
            ordered.sort_by(|a, b| a.zone().cmp(b.zone()).then_with(|| volume_desc(a, b)));
        }
    }

    ordered
}
