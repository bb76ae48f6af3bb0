//! Load-order rearrangement.
//!
//! Turns a packing into a sequence that can physically be loaded through the
//! door: the large section keeps its packing order, the small section is
//! loaded in depth layers from the back wall forward.

use std::cmp::Ordering;
use u_loading_core::geometry::{approx, EPSILON};
use u_loading_core::{Container, PackingResult, PlacedItem};

/// Depth tolerance (in container units) for absorbing items into a layer.
pub const LAYER_BUFFER: f64 = 10.0;

fn cmp_f64(a: f64, b: f64) -> Ordering {
    if approx(a, b) {
        Ordering::Equal
    } else {
        a.partial_cmp(&b).unwrap_or(Ordering::Equal)
    }
}

/// Reassigns load orders and returns the items in their new load order.
///
/// Only `load_order` changes. The result is a bijection onto `1..=N` and the
/// operation is idempotent.
pub fn rearrange(placed: &[PlacedItem], container: &Container) -> Vec<PlacedItem> {
    let boundary = container.section_boundary();
    let length = container.length();

    let (mut large, mut small): (Vec<PlacedItem>, Vec<PlacedItem>) = placed
        .iter()
        .cloned()
        .partition(|p| p.x() + p.orientation.dx <= boundary + EPSILON);

    large.sort_by_key(|p| p.load_order);

    // Deepest first, ties toward the floor.
    small.sort_by(|a, b| {
        cmp_f64(b.y(), a.y())
            .then_with(|| cmp_f64(a.z(), b.z()))
            .then_with(|| cmp_f64(a.x(), b.x()))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    let mut layers: Vec<Vec<PlacedItem>> = Vec::new();
    let mut current: Vec<PlacedItem> = Vec::new();
    let mut span = 0.0;
    let mut remaining = small;

    while !remaining.is_empty() {
        let first = remaining.remove(0);
        let depth = length - first.y();

        if depth > span + EPSILON {
            if !current.is_empty() {
                layers.push(std::mem::take(&mut current));
            }
            span = depth;
        }
        current.push(first);

        let (mut absorbed, rest): (Vec<PlacedItem>, Vec<PlacedItem>) = remaining
            .into_iter()
            .partition(|p| length - p.y() <= span + LAYER_BUFFER + EPSILON);
        remaining = rest;

        absorbed.sort_by(|a, b| cmp_f64(a.z(), b.z()));
        current.extend(absorbed);
    }
    if !current.is_empty() {
        layers.push(current);
    }

    large
        .into_iter()
        .chain(layers.into_iter().flatten())
        .enumerate()
        .map(|(i, mut p)| {
            p.load_order = i + 1;
            p
        })
        .collect()
}

/// Rearranges the placed items of a packing result.
pub fn rearrange_result(result: &PackingResult, container: &Container) -> PackingResult {
    PackingResult {
        placed: rearrange(&result.placed, container),
        ..result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use u_loading_core::{Orientation, Zone};

    fn placed(id: u32, x: f64, y: f64, z: f64, size: (f64, f64, f64), order: usize) -> PlacedItem {
        PlacedItem::new(
            id,
            Vector3::new(x, y, z),
            Orientation::new(size.0, size.1, size.2),
            Zone::new("po1"),
            order,
            1.0,
        )
    }

    fn orders(items: &[PlacedItem]) -> Vec<(u32, usize)> {
        items.iter().map(|p| (p.item_id, p.load_order)).collect()
    }

    #[test]
    fn test_large_section_keeps_relative_order() {
        let container = Container::new(100.0, 100.0, 50.0).unwrap();
        let items = vec![
            placed(1, 0.0, 0.0, 0.0, (10.0, 10.0, 10.0), 5),
            placed(2, 10.0, 0.0, 0.0, (10.0, 10.0, 10.0), 2),
            placed(3, 60.0, 0.0, 0.0, (10.0, 10.0, 10.0), 9),
        ];
        let result = rearrange(&items, &container);
        assert_eq!(orders(&result), vec![(2, 1), (1, 2), (3, 3)]);
    }

    #[test]
    fn test_small_section_layers_from_the_back() {
        // Boundary at x = 70, length 100.
        let container = Container::new(100.0, 100.0, 50.0).unwrap();
        let items = vec![
            placed(1, 75.0, 0.0, 0.0, (20.0, 20.0, 10.0), 1),
            placed(2, 75.0, 80.0, 10.0, (20.0, 20.0, 10.0), 2),
            placed(3, 75.0, 80.0, 0.0, (20.0, 20.0, 10.0), 3),
            placed(4, 75.0, 50.0, 0.0, (20.0, 30.0, 10.0), 4),
            placed(5, 75.0, 75.0, 0.0, (5.0, 5.0, 5.0), 5),
        ];
        let result = rearrange(&items, &container);

        // Layer 1 (depth 20, absorbs up to depth 30): 3, then 5 and 2 by height.
        // Layer 2 (depth 50): 4.  Layer 3 (depth 100): 1.
        assert_eq!(
            orders(&result),
            vec![(3, 1), (5, 2), (2, 3), (4, 4), (1, 5)]
        );
    }

    #[test]
    fn test_rearrange_is_idempotent_bijection() {
        let container = Container::new(100.0, 100.0, 50.0).unwrap();
        let items = vec![
            placed(1, 75.0, 0.0, 0.0, (20.0, 20.0, 10.0), 4),
            placed(2, 0.0, 0.0, 0.0, (20.0, 20.0, 10.0), 1),
            placed(3, 75.0, 80.0, 0.0, (20.0, 20.0, 10.0), 2),
            placed(4, 20.0, 40.0, 0.0, (20.0, 20.0, 10.0), 3),
        ];
        let once = rearrange(&items, &container);
        let twice = rearrange(&once, &container);
        assert_eq!(once, twice);

        let mut seen: Vec<usize> = once.iter().map(|p| p.load_order).collect();
        seen.sort();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_input() {
        let container = Container::new(10.0, 10.0, 10.0).unwrap();
        assert!(rearrange(&[], &container).is_empty());
    }
}
