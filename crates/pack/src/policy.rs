//! Placement policies.
//!
//! A policy is plain data: the engine reads it to decide the scan order,
//! how candidates are compared, how much support is required and whether the
//! container width is split into sections.

use u_loading_core::{split_width, OrientationSet, PackingMethod, SECTION_RATIO};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which candidate positions are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanOrder {
    /// `z` asc, then `y` asc, then `x` asc.
    BottomLeft,
    /// `y` desc from the back wall, then `x` asc, then `z` asc.
    BackToFront,
    /// `x` asc, then `y` asc, then `z` asc.
    LeftToRight,
}

/// How the engine picks among feasible candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// First feasible position per orientation; the best of those in scan
    /// order wins, ties keep the earlier orientation.
    FirstPerOrientation,
    /// Every feasible candidate is scored by contact area; the highest wins.
    BestContact,
    /// First feasible position of the first orientation that has one.
    FirstFit,
}

/// Width sectioning for policies that separate large and small items.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sectioning {
    /// Share of the width taken by the large section.
    pub ratio: f64,
    /// Extra clearance on each side of the bridge section.
    pub buffer: f64,
    /// Whether a bridge section spanning the boundary is tried.
    pub bridge: bool,
}

impl Sectioning {
    /// Default large-section share.
    pub const RATIO: f64 = SECTION_RATIO;
    /// Default bridge clearance.
    pub const BUFFER: f64 = 10.0;

    /// Sectioning with a bridge across the boundary.
    pub fn with_bridge() -> Self {
        Self {
            ratio: Self::RATIO,
            buffer: Self::BUFFER,
            bridge: true,
        }
    }

    /// Sectioning without a bridge.
    pub fn without_bridge() -> Self {
        Self {
            bridge: false,
            ..Self::with_bridge()
        }
    }

    /// Returns the x coordinate splitting the two sections.
    pub fn boundary(&self, width: f64) -> f64 {
        split_width(width, self.ratio)
    }
}

/// Placement policy driving the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementPolicy {
    /// Position scan order.
    pub scan: ScanOrder,
    /// Candidate selection rule.
    pub selection: Selection,
    /// Minimum supported share of the footprint for items above the floor.
    pub support_threshold: f64,
    /// Orientations tried for every item.
    pub orientations: OrientationSet,
    /// Width sectioning, if any.
    pub sectioning: Option<Sectioning>,
}

impl PlacementPolicy {
    /// Bottom-Left Fill: 6 orientations, 80 % support, whole width.
    pub fn bottom_left_fill() -> Self {
        Self {
            scan: ScanOrder::BottomLeft,
            selection: Selection::FirstPerOrientation,
            support_threshold: 0.8,
            orientations: OrientationSet::All,
            sectioning: None,
        }
    }

    /// Back-to-front best fit: 3 orientations, 80 % support, bridged sections.
    pub fn back_to_front_best_fit() -> Self {
        Self {
            scan: ScanOrder::BackToFront,
            selection: Selection::BestContact,
            support_threshold: 0.8,
            orientations: OrientationSet::Reduced,
            sectioning: Some(Sectioning::with_bridge()),
        }
    }

    /// Strict support first fit: 3 orientations, full support, sections.
    pub fn strict_support_subvolume() -> Self {
        Self {
            scan: ScanOrder::LeftToRight,
            selection: Selection::FirstFit,
            support_threshold: 1.0,
            orientations: OrientationSet::Reduced,
            sectioning: Some(Sectioning::without_bridge()),
        }
    }

    /// Returns the policy for a packing method.
    pub fn for_method(method: PackingMethod) -> Self {
        match method {
            PackingMethod::BottomLeftFill => Self::bottom_left_fill(),
            PackingMethod::BackToFrontBestFit => Self::back_to_front_best_fit(),
            PackingMethod::StrictSupportSubvolume => Self::strict_support_subvolume(),
        }
    }
}

impl From<PackingMethod> for PlacementPolicy {
    fn from(method: PackingMethod) -> Self {
        Self::for_method(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_policies() {
        let blf = PlacementPolicy::for_method(PackingMethod::BottomLeftFill);
        assert_eq!(blf.orientations, OrientationSet::All);
        assert!(blf.sectioning.is_none());

        let best_fit = PlacementPolicy::from(PackingMethod::BackToFrontBestFit);
        assert_eq!(best_fit.selection, Selection::BestContact);
        assert!(best_fit.sectioning.map_or(false, |s| s.bridge));

        let strict = PlacementPolicy::for_method(PackingMethod::StrictSupportSubvolume);
        assert_eq!(strict.support_threshold, 1.0);
        assert!(strict.sectioning.map_or(false, |s| !s.bridge));
    }

    #[test]
    fn test_section_boundary() {
        let sectioning = Sectioning::with_bridge();
        assert_eq!(sectioning.boundary(100.0), 70.0);
        assert_eq!(sectioning.boundary(235.0), 164.0);

        let container = u_loading_core::Container::new(235.0, 100.0, 100.0).unwrap();
        assert_eq!(sectioning.boundary(235.0), container.section_boundary());
    }
}
