//! Geometry and orientation model.
//!
//! Pure query layer shared by the placement engine and the unload simulator:
//! orientation enumeration, axis-aligned boxes and the overlap, containment
//! and contact predicates built on them.

use crate::item::Item;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used for all coordinate comparisons.
pub const EPSILON: f64 = 1e-9;

/// Axis permutations in enumeration order. The first three form the
/// reduced set.
const PERMUTATIONS: [(usize, usize, usize); 6] = [
    (0, 1, 2), // (w, l, h)
    (0, 2, 1), // (w, h, l)
    (1, 0, 2), // (l, w, h)
    (1, 2, 0), // (l, h, w)
    (2, 0, 1), // (h, w, l)
    (2, 1, 0), // (h, l, w)
];

/// Which orientations an item exposes to the placement search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrientationSet {
    /// All 6 axis-aligned permutations.
    #[default]
    All,
    /// The reduced subset: `(w,l,h)`, `(w,h,l)`, `(l,w,h)`.
    Reduced,
}

impl OrientationSet {
    /// Number of orientations in the set.
    pub fn len(&self) -> usize {
        match self {
            OrientationSet::All => 6,
            OrientationSet::Reduced => 3,
        }
    }

    /// Always false; every set holds at least one orientation.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Oriented extents `(dx, dy, dz)` of an item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    /// Extent along x (container width).
    pub dx: f64,
    /// Extent along y (container length / depth).
    pub dy: f64,
    /// Extent along z (height).
    pub dz: f64,
}

impl Orientation {
    /// Creates an orientation from its extents.
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// Returns the extents as a vector.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.dx, self.dy, self.dz)
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.dx * self.dy * self.dz
    }

    /// Returns the footprint (bottom face) area.
    pub fn footprint_area(&self) -> f64 {
        self.dx * self.dy
    }

    /// Returns true if both orientations have the same extents.
    pub fn approx_eq(&self, other: &Orientation) -> bool {
        (self.dx - other.dx).abs() < EPSILON
            && (self.dy - other.dy).abs() < EPSILON
            && (self.dz - other.dz).abs() < EPSILON
    }
}

/// Enumerates the orientations of an item.
///
/// The iterator is a pure function of the item's dimensions and yields
/// permutations in a fixed order.
pub fn orientations(item: &Item, set: OrientationSet) -> impl Iterator<Item = Orientation> {
    let dims = *item.dimensions();
    PERMUTATIONS
        .into_iter()
        .take(set.len())
        .map(move |(a, b, c)| Orientation::new(dims[a], dims[b], dims[c]))
}

/// An axis-aligned box given by its minimum corner and extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    /// Minimum corner.
    pub min: Vector3<f64>,
    /// Extents along each axis.
    pub size: Vector3<f64>,
}

impl Cuboid {
    /// Creates a box from a minimum corner and an orientation.
    pub fn new(position: Vector3<f64>, orientation: Orientation) -> Self {
        Self {
            min: position,
            size: orientation.as_vector(),
        }
    }

    /// Creates a box from raw coordinates.
    pub fn from_coords(x: f64, y: f64, z: f64, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            min: Vector3::new(x, y, z),
            size: Vector3::new(dx, dy, dz),
        }
    }

    /// Returns the maximum corner.
    pub fn max(&self) -> Vector3<f64> {
        self.min + self.size
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.size.x * self.size.y * self.size.z
    }

    /// Returns the z coordinate of the top face.
    pub fn top(&self) -> f64 {
        self.min.z + self.size.z
    }

    /// Returns the footprint area.
    pub fn footprint_area(&self) -> f64 {
        self.size.x * self.size.y
    }

    /// Checks whether the interiors of two boxes intersect.
    ///
    /// Boxes do not overlap iff they are separated along at least one axis;
    /// boxes sharing a face are separated.
    pub fn overlaps(&self, other: &Cuboid) -> bool {
        let self_max = self.max();
        let other_max = other.max();

        let separated_x =
            self.min.x >= other_max.x - EPSILON || other.min.x >= self_max.x - EPSILON;
        let separated_y =
            self.min.y >= other_max.y - EPSILON || other.min.y >= self_max.y - EPSILON;
        let separated_z =
            self.min.z >= other_max.z - EPSILON || other.min.z >= self_max.z - EPSILON;

        !(separated_x || separated_y || separated_z)
    }

    /// Length of the overlap of the two boxes along the x axis.
    pub fn overlap_x(&self, other: &Cuboid) -> f64 {
        overlap_length(self.min.x, self.max().x, other.min.x, other.max().x)
    }

    /// Length of the overlap of the two boxes along the y axis.
    pub fn overlap_y(&self, other: &Cuboid) -> f64 {
        overlap_length(self.min.y, self.max().y, other.min.y, other.max().y)
    }

    /// Length of the overlap of the two boxes along the z axis.
    pub fn overlap_z(&self, other: &Cuboid) -> f64 {
        overlap_length(self.min.z, self.max().z, other.min.z, other.max().z)
    }

    /// Area of the intersection of the two footprints (xy projections).
    pub fn footprint_overlap_area(&self, other: &Cuboid) -> f64 {
        self.overlap_x(other) * self.overlap_y(other)
    }

    /// Area of the faces the two boxes share.
    ///
    /// Non-zero only when the boxes are exactly adjacent along one axis and
    /// their projections on the other two axes intersect.
    pub fn contact_area(&self, other: &Cuboid) -> f64 {
        let self_max = self.max();
        let other_max = other.max();
        let mut area = 0.0;

        if approx(self_max.x, other.min.x) || approx(other_max.x, self.min.x) {
            area += self.overlap_y(other) * self.overlap_z(other);
        }
        if approx(self_max.y, other.min.y) || approx(other_max.y, self.min.y) {
            area += self.overlap_x(other) * self.overlap_z(other);
        }
        if approx(self_max.z, other.min.z) || approx(other_max.z, self.min.z) {
            area += self.overlap_x(other) * self.overlap_y(other);
        }

        area
    }
}

/// Length of the intersection of `[a0, a1]` and `[b0, b1]` (zero if disjoint).
#[inline]
pub fn overlap_length(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

/// Tolerant equality for coordinates.
#[inline]
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
