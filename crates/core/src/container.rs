//! The container (cargo space) being loaded.

use crate::error::{Error, Result};
use crate::geometry::{Cuboid, EPSILON};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Share of the nominal cargo space that is usable for loading.
pub const EFFICIENCY_FACTOR: f64 = 0.8;

/// Share of the width that belongs to the large section.
pub const SECTION_RATIO: f64 = 0.7;

/// x coordinate splitting a width into a `ratio` share and the rest,
/// floored to whole units.
pub fn split_width(width: f64, ratio: f64) -> f64 {
    (width * ratio).floor()
}

/// A container with its origin at the door's bottom-left corner.
///
/// `y = 0` is the door (exit) and `y = length` the back wall.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Dimensions (width, length, height).
    dimensions: Vector3<f64>,
}

impl Container {
    /// Creates a container with the given usable dimensions.
    pub fn new(width: f64, length: f64, height: f64) -> Result<Self> {
        if ![width, length, height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
        {
            return Err(Error::InvalidContainer(format!(
                "All dimensions must be positive (got {} x {} x {})",
                width, length, height
            )));
        }

        Ok(Self {
            dimensions: Vector3::new(width, length, height),
        })
    }

    /// Creates a container from a nominal size scaled by [`EFFICIENCY_FACTOR`].
    pub fn from_nominal(width: f64, length: f64, height: f64) -> Result<Self> {
        Self::new(
            width * EFFICIENCY_FACTOR,
            length * EFFICIENCY_FACTOR,
            height * EFFICIENCY_FACTOR,
        )
    }

    /// Returns the dimensions (width, length, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the length (door to back wall).
    pub fn length(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the x coordinate splitting the large and small sections.
    pub fn section_boundary(&self) -> f64 {
        split_width(self.width(), SECTION_RATIO)
    }

    /// Checks whether a box lies entirely inside the container.
    pub fn contains(&self, cuboid: &Cuboid) -> bool {
        let max = cuboid.max();
        cuboid.min.x >= -EPSILON
            && cuboid.min.y >= -EPSILON
            && cuboid.min.z >= -EPSILON
            && max.x <= self.dimensions.x + EPSILON
            && max.y <= self.dimensions.y + EPSILON
            && max.z <= self.dimensions.z + EPSILON
    }
}
