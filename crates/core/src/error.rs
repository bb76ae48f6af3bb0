//! Error types for U-Loading.

use thiserror::Error;

/// Result type alias for U-Loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building scenarios, packing or unloading.
///
/// An item that cannot be placed is not an error: it ends up in
/// [`PackingResult::unplaced`](crate::PackingResult::unplaced).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item provided.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid container provided.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Configuration error (unknown method, bad zone order, ...).
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A scenario without any items.
    #[error("Scenario contains no items")]
    EmptyScenario,

    /// An operation referenced an item that is not part of the packing.
    #[error("Unknown item id: {0}")]
    UnknownItem(u32),

    /// Internal invariant violated.
    #[error("Internal error: {0}")]
    Internal(String),
}
