//! # U-Loading Pack
//!
//! Container packing for the U-Loading engine.
//!
//! This crate provides the placement engine with its three policies, the
//! iterative ordering optimizer, load-order rearrangement and layout
//! validation.

pub mod engine;
pub mod occupancy;
pub mod optimizer;
pub mod ordering;
pub mod packer;
pub mod policy;
pub mod rearrange;
pub mod section;
pub mod support;
pub mod validate;

// Re-exports
pub use engine::{Candidate, PlacementEngine};
pub use occupancy::OccupancyIndex;
pub use optimizer::Optimizer;
pub use packer::Packer;
pub use policy::{PlacementPolicy, ScanOrder, Sectioning, Selection};
pub use rearrange::{rearrange, rearrange_result};
pub use support::support_ratio;
pub use validate::validate_layout;
pub use u_loading_core::{
    Config, Container, Error, Item, OrderingStrategy, PackingMethod, PackingResult, PlacedItem,
    Result, Solver,
};
