//! Integration tests for u-loading-core.

use u_loading_core::geometry::{orientations, Cuboid, OrientationSet};
use u_loading_core::{Config, Container, Error, Item, PackingMethod, PackingResult, Zone};

mod geometry_tests {
    use super::*;

    #[test]
    fn test_orientations_fit_container() {
        // 50 x 20 x 10 only fits a 30 x 60 x 25 container lying along y.
        let container = Container::new(30.0, 60.0, 25.0).unwrap();
        let item = Item::new(1, 50.0, 20.0, 10.0, 1.0, "po1").unwrap();

        let fitting: Vec<_> = orientations(&item, OrientationSet::All)
            .filter(|o| container.contains(&Cuboid::from_coords(0.0, 0.0, 0.0, o.dx, o.dy, o.dz)))
            .collect();

        assert!(!fitting.is_empty());
        assert!(fitting.iter().all(|o| (o.dy - 50.0).abs() < 1e-9));
    }

    #[test]
    fn test_reduced_set_is_prefix_of_full_set() {
        let item = Item::new(1, 3.0, 5.0, 7.0, 1.0, "po1").unwrap();
        let all: Vec<_> = item.orientations(OrientationSet::All).collect();
        let reduced: Vec<_> = item.orientations(OrientationSet::Reduced).collect();
        assert_eq!(&all[..3], &reduced[..]);
    }

    #[test]
    fn test_stacked_boxes_touch_but_do_not_overlap() {
        let bottom = Cuboid::from_coords(0.0, 0.0, 0.0, 2.0, 2.0, 2.0);
        let top = Cuboid::from_coords(0.0, 0.0, 2.0, 2.0, 2.0, 2.0);
        assert!(!bottom.overlaps(&top));
        assert!((bottom.contact_area(&top) - 4.0).abs() < 1e-9);
    }
}

mod model_tests {
    use super::*;

    #[test]
    fn test_zone_labels() {
        let item = Item::new(3, 1.0, 1.0, 1.0, 1.0, "po4").unwrap();
        assert_eq!(item.zone(), &Zone::new("po4"));
        assert_eq!(item.zone().rank(), Some(4));
        assert_eq!(item.zone().to_string(), "po4");
    }

    #[test]
    fn test_error_messages() {
        let err = Item::new(9, -1.0, 1.0, 1.0, 1.0, "po1").unwrap_err();
        assert!(matches!(err, Error::InvalidItem(_)));
        assert!(err.to_string().contains("item 9"));

        let err = "first-fit".parse::<PackingMethod>().unwrap_err();
        assert!(err.to_string().contains("first-fit"));
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_method(PackingMethod::BottomLeftFill)
            .with_iterations(3)
            .with_seed(42)
            .with_parallel(true);

        assert_eq!(config.effective_iterations(), 3);
        assert_eq!(config.seed, Some(42));
        assert!(config.parallel);
    }

    #[test]
    fn test_empty_result() {
        let result = PackingResult::new();
        assert_eq!(result.placed_count(), 0);
        assert_eq!(result.utilization_percent(), "0.0%");
    }
}
