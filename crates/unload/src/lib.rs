//! # U-Loading Unload
//!
//! Unload blocking simulation for packed containers.
//!
//! The simulator visits destinations in a fixed order and, for every item
//! of the active destination, clears the items blocking it before taking it
//! out. Each handling step is logged with a cost so layouts produced by
//! different packing methods can be compared.
//!
//! ## Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use u_loading_core::{Orientation, PlacedItem, Zone};
//! use u_loading_unload::{UnloadSimulator, ZoneOrder};
//!
//! let size = Orientation::new(2.0, 2.0, 2.0);
//! let placed = vec![
//!     PlacedItem::new(1, Vector3::new(0.0, 0.0, 0.0), size, Zone::new("po1"), 1, 1.0),
//!     PlacedItem::new(2, Vector3::new(0.0, 0.0, 2.0), size, Zone::new("po2"), 2, 1.0),
//! ];
//!
//! let order = ZoneOrder::new(["po1", "po2"]).unwrap();
//! let report = UnloadSimulator::default().simulate(&placed, &order).unwrap();
//! assert_eq!(report.total_operations, 4);
//! assert_eq!(report.reloading_count, 1);
//! ```

pub mod cost;
pub mod operation;
pub mod reach;
pub mod simulator;

// Re-exports
pub use cost::CostModel;
pub use operation::{Action, Operation, UnloadReport, UnloadStep};
pub use reach::{BlockKind, ReachModel};
pub use simulator::{BlockerScope, ReloadPolicy, UnloadConfig, UnloadSimulator, ZoneOrder};
