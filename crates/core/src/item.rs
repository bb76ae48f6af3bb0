//! Items to be loaded and their destination zones.

use crate::error::{Error, Result};
use crate::geometry::{orientations, Orientation, OrientationSet};
use nalgebra::Vector3;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique item identifier.
pub type ItemId = u32;

/// A destination (pickup/drop) zone label such as `po1`.
///
/// Zones carry an optional numeric rank parsed from the trailing digits of
/// the label. Ranked zones order by rank; unranked zones sort after them,
/// by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Zone(String);

impl Zone {
    /// Creates a zone from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the zone label.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// Returns the numeric rank encoded in the label (`po3` → 3).
    pub fn rank(&self) -> Option<u32> {
        let digits_start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;
        self.0[digits_start..].parse().ok()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Zone {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Zone {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rectangular item to be loaded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawItem"))]
pub struct Item {
    /// Unique identifier.
    id: ItemId,

    /// Dimensions (width, length, height).
    dimensions: Vector3<f64>,

    /// Weight of the item.
    weight: f64,

    /// Destination zone.
    zone: Zone,
}

/// Serialized form of [`Item`], checked through [`Item::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawItem {
    id: ItemId,
    dimensions: Vector3<f64>,
    weight: f64,
    zone: Zone,
}

#[cfg(feature = "serde")]
impl TryFrom<RawItem> for Item {
    type Error = Error;

    fn try_from(raw: RawItem) -> Result<Self> {
        let d = raw.dimensions;
        Item::new(raw.id, d.x, d.y, d.z, raw.weight, raw.zone)
    }
}

impl Item {
    /// Creates a new item, rejecting non-positive dimensions or weight.
    pub fn new(
        id: ItemId,
        width: f64,
        length: f64,
        height: f64,
        weight: f64,
        zone: impl Into<Zone>,
    ) -> Result<Self> {
        let dims_ok = [width, length, height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0);
        if !dims_ok {
            return Err(Error::InvalidItem(format!(
                "All dimensions for item {} must be positive (got {} x {} x {})",
                id, width, length, height
            )));
        }

        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidItem(format!(
                "Weight for item {} must be positive (got {})",
                id, weight
            )));
        }

        Ok(Self {
            id,
            dimensions: Vector3::new(width, length, height),
            weight,
            zone: zone.into(),
        })
    }

    /// Returns the identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the dimensions (width, length, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the length.
    pub fn length(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the destination zone.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns the largest of the three dimensions.
    pub fn max_dimension(&self) -> f64 {
        self.dimensions.max()
    }

    /// Returns the orientations this item may take under the given set.
    pub fn orientations(&self, set: OrientationSet) -> impl Iterator<Item = Orientation> + '_ {
        orientations(self, set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_item_volume() {
        let item = Item::new(1, 10.0, 20.0, 30.0, 2.5, "po1").unwrap();
        assert_relative_eq!(item.volume(), 6000.0, epsilon = 1e-9);
        assert_relative_eq!(item.max_dimension(), 30.0);
    }

    #[test]
    fn test_item_validation() {
        assert!(Item::new(1, 0.0, 1.0, 1.0, 1.0, "po1").is_err());
        assert!(Item::new(2, 1.0, -1.0, 1.0, 1.0, "po1").is_err());
        assert!(Item::new(3, 1.0, 1.0, f64::NAN, 1.0, "po1").is_err());
        assert!(Item::new(4, 1.0, 1.0, 1.0, 0.0, "po1").is_err());
        assert!(Item::new(5, 1.0, 1.0, 1.0, 1.0, "po1").is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_checks_dimensions() {
        let item = Item::new(7, 1.0, 2.0, 3.0, 4.0, "po2").unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);

        let zero_width = r#"{"id":8,"dimensions":[0.0,2.0,3.0],"weight":1.0,"zone":"po1"}"#;
        let err = serde_json::from_str::<Item>(zero_width).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_zone_rank() {
        assert_eq!(Zone::new("po3").rank(), Some(3));
        assert_eq!(Zone::new("po12").rank(), Some(12));
        assert_eq!(Zone::new("dock").rank(), None);
    }

    #[test]
    fn test_zone_ordering() {
        let mut zones = vec![
            Zone::new("po10"),
            Zone::new("dock"),
            Zone::new("po2"),
            Zone::new("po1"),
        ];
        zones.sort();
        let labels: Vec<&str> = zones.iter().map(|z| z.label()).collect();
        assert_eq!(labels, vec!["po1", "po2", "po10", "dock"]);
    }
}
