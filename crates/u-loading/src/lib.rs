//! # U-Loading
//!
//! Container loading and unload planning engine.
//!
//! This crate provides:
//! - **Packing**: three placement policies (bottom-left fill, back-to-front
//!   best fit, strict-support subvolume) driven by an iterative ordering
//!   optimizer
//! - **Rearrangement**: turning a packing into a physically loadable sequence
//! - **Unloading**: zone-by-zone blocking simulation with a handling cost model
//!
//! ## Quick Start
//!
//! ```rust
//! use u_loading::{Config, Container, Item, PackingMethod, Solver};
//! use u_loading::pack::{rearrange, Packer};
//! use u_loading::unload::{UnloadSimulator, ZoneOrder};
//!
//! let container = Container::new(8.0, 8.0, 8.0).unwrap();
//! let items = vec![
//!     Item::new(1, 4.0, 4.0, 4.0, 1.0, "po1").unwrap(),
//!     Item::new(2, 4.0, 4.0, 4.0, 1.0, "po2").unwrap(),
//! ];
//!
//! let config = Config::new().with_method(PackingMethod::BottomLeftFill).with_seed(7);
//! let result = Packer::new(config).solve(&items, &container).unwrap();
//! let placed = rearrange(&result.placed, &container);
//!
//! let order = ZoneOrder::from_items(&placed);
//! let report = UnloadSimulator::default().simulate(&placed, &order).unwrap();
//! assert_eq!(report.total_operations, 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `pack` (default): packing engine and optimizer
//! - `unload` (default): unload simulation
//! - `serde`: Serialization support

/// Core data model.
pub use u_loading_core as core;

/// Packing engine, optimizer and rearrangement.
#[cfg(feature = "pack")]
pub use u_loading_pack as pack;

/// Unload blocking simulation.
#[cfg(feature = "unload")]
pub use u_loading_unload as unload;

// Re-export commonly used types at root level
pub use u_loading_core::{
    Config, Container, Error, Item, ItemId, OrderingStrategy, PackingMethod, PackingResult, PlacedItem,
    Result, Solver, Zone,
};
