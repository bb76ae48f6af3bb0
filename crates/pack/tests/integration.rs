//! Integration tests for u-loading-pack.

use approx::assert_relative_eq;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_loading_pack::{
    rearrange, rearrange_result, validate_layout, Config, Container, Item, PackingMethod,
    Packer, PlacementPolicy, Solver,
};

fn random_items(seed: u64, count: u32) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=count)
        .map(|id| {
            let zone = format!("po{}", rng.gen_range(1..=5));
            Item::new(
                id,
                rng.gen_range(4..=14) as f64,
                rng.gen_range(4..=14) as f64,
                rng.gen_range(3..=10) as f64,
                rng.gen_range(1.0..50.0),
                zone,
            )
            .unwrap()
        })
        .collect()
}

fn config(method: PackingMethod) -> Config {
    Config::new()
        .with_method(method)
        .with_iterations(3)
        .with_seed(2024)
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_two_cubes_bottom_left_fill() {
        let container = Container::new(8.0, 8.0, 8.0).unwrap();
        let items = vec![
            Item::new(1, 4.0, 4.0, 4.0, 1.0, "po1").unwrap(),
            Item::new(2, 4.0, 4.0, 4.0, 1.0, "po1").unwrap(),
        ];

        let result = Packer::new(config(PackingMethod::BottomLeftFill))
            .solve(&items, &container)
            .unwrap();

        assert_eq!(result.placed.len(), 2);
        assert_eq!(result.placed[0].position, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(result.placed[1].position, Vector3::new(4.0, 0.0, 0.0));
        assert_relative_eq!(result.utilization, 0.25);
    }

    #[test]
    fn test_oversized_item_is_unplaced() {
        let container = Container::new(5.0, 5.0, 5.0).unwrap();
        let items = vec![Item::new(1, 10.0, 10.0, 10.0, 1.0, "po1").unwrap()];

        for method in PackingMethod::ALL {
            let result = Packer::new(config(method)).solve(&items, &container).unwrap();
            assert!(result.placed.is_empty());
            assert_eq!(result.unplaced.len(), 1);
            assert_eq!(result.unplaced[0].id(), 1);
            assert_eq!(result.utilization, 0.0);
        }
    }

    #[test]
    fn test_empty_item_set() {
        let container = Container::new(5.0, 5.0, 5.0).unwrap();
        for method in PackingMethod::ALL {
            let result = Packer::new(config(method)).solve(&[], &container).unwrap();
            assert!(result.placed.is_empty());
            assert_eq!(result.utilization, 0.0);
        }
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_layouts_are_valid_for_every_method() {
        let container = Container::new(40.0, 60.0, 30.0).unwrap();

        for seed in [1, 2, 3] {
            let items = random_items(seed, 30);
            for method in PackingMethod::ALL {
                let result = Packer::new(config(method)).solve(&items, &container).unwrap();
                let threshold = PlacementPolicy::for_method(method).support_threshold;

                validate_layout(&result, &container, threshold).unwrap();
                assert_eq!(result.placed.len() + result.unplaced.len(), items.len());

                let volume: f64 = result.placed.iter().map(|p| p.volume()).sum();
                assert_relative_eq!(result.utilization, volume / container.volume(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_placed_orientations_are_permutations() {
        let container = Container::new(40.0, 60.0, 30.0).unwrap();
        let items = random_items(9, 25);
        let result = Packer::new(config(PackingMethod::BottomLeftFill))
            .solve(&items, &container)
            .unwrap();

        for p in &result.placed {
            let item = items.iter().find(|i| i.id() == p.item_id).unwrap();
            let mut dims = [item.width(), item.length(), item.height()];
            let mut oriented = [p.orientation.dx, p.orientation.dy, p.orientation.dz];
            dims.sort_by(|a, b| a.partial_cmp(b).unwrap());
            oriented.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(dims, oriented);
            assert_eq!(&p.zone, item.zone());
        }
    }

    #[test]
    fn test_utilization_history_is_monotonic() {
        let container = Container::new(40.0, 60.0, 30.0).unwrap();
        let items = random_items(4, 40);
        let result = Packer::new(
            Config::new()
                .with_method(PackingMethod::BottomLeftFill)
                .with_iterations(6)
                .with_seed(5),
        )
        .solve(&items, &container)
        .unwrap();

        assert_eq!(result.utilization_history.len(), 6);
        for pair in result.utilization_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(result.best_iteration < 6);
    }

    #[test]
    fn test_rearrangement_is_an_idempotent_bijection() {
        let container = Container::new(40.0, 60.0, 30.0).unwrap();
        let items = random_items(6, 30);

        for method in PackingMethod::ALL {
            let result = Packer::new(config(method)).solve(&items, &container).unwrap();
            let rearranged = rearrange_result(&result, &container);

            let mut orders: Vec<usize> = rearranged.placed.iter().map(|p| p.load_order).collect();
            orders.sort();
            assert_eq!(orders, (1..=result.placed.len()).collect::<Vec<_>>());

            // Only load orders change.
            for p in &rearranged.placed {
                let original = result.get(p.item_id).unwrap();
                assert_eq!(p.position, original.position);
                assert_eq!(p.orientation, original.orientation);
            }

            let again = rearrange(&rearranged.placed, &container);
            assert_eq!(again, rearranged.placed);
            validate_layout(&rearranged, &container, 0.8).unwrap();
        }
    }
}
