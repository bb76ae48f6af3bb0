//! Placement representation for loaded items.

use crate::geometry::{Cuboid, Orientation};
use crate::item::{ItemId, Zone};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item placed inside the container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedItem {
    /// The ID of the placed item.
    pub item_id: ItemId,

    /// Minimum corner of the placed box.
    pub position: Vector3<f64>,

    /// Extents of the item in its chosen orientation.
    pub orientation: Orientation,

    /// Destination zone.
    pub zone: Zone,

    /// 1-based loading sequence number.
    pub load_order: usize,

    /// Weight of the item.
    pub weight: f64,
}

impl PlacedItem {
    /// Creates a new placement.
    pub fn new(
        item_id: ItemId,
        position: Vector3<f64>,
        orientation: Orientation,
        zone: Zone,
        load_order: usize,
        weight: f64,
    ) -> Self {
        Self {
            item_id,
            position,
            orientation,
            zone,
            load_order,
            weight,
        }
    }

    /// Returns the occupied box.
    pub fn cuboid(&self) -> Cuboid {
        Cuboid::new(self.position, self.orientation)
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Returns the y coordinate (distance of the front face from the door).
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Returns the z coordinate of the top face.
    pub fn top(&self) -> f64 {
        self.position.z + self.orientation.dz
    }

    /// Returns the height of the centre of the box.
    pub fn center_height(&self) -> f64 {
        self.position.z + self.orientation.dz / 2.0
    }

    /// Returns the occupied volume.
    pub fn volume(&self) -> f64 {
        self.orientation.volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_placed_item_geometry() {
        let placed = PlacedItem::new(
            7,
            Vector3::new(1.0, 2.0, 3.0),
            Orientation::new(4.0, 5.0, 6.0),
            Zone::new("po2"),
            1,
            10.0,
        );

        assert_relative_eq!(placed.top(), 9.0);
        assert_relative_eq!(placed.center_height(), 6.0);
        assert_relative_eq!(placed.volume(), 120.0);
        assert_eq!(placed.cuboid().max(), Vector3::new(5.0, 7.0, 9.0));
    }
}
