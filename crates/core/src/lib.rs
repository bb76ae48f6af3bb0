//! # U-Loading Core
//!
//! Core types for the U-Loading container loading engine.
//!
//! This crate provides the data model shared by the packing and unloading
//! crates.
//!
//! ## Core Components
//!
//! - **Items and zones**: `Item`, `Zone`
//! - **Geometry**: orientation enumeration, `Cuboid` overlap and contact tests
//! - **Container**: usable cargo space and its width sections
//! - **Results**: `PlacedItem`, `PackingResult`, `PackingSummary`
//! - **Solver**: `Config`, `PackingMethod`, `OrderingStrategy` and the `Solver` trait
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod container;
pub mod error;
pub mod geometry;
pub mod item;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use container::{split_width, Container, EFFICIENCY_FACTOR, SECTION_RATIO};
pub use error::{Error, Result};
pub use geometry::{Cuboid, Orientation, OrientationSet, EPSILON};
pub use item::{Item, ItemId, Zone};
pub use placement::PlacedItem;
pub use result::{PackingResult, PackingSummary};
pub use solver::{Config, OrderingStrategy, PackingMethod, Solver};
