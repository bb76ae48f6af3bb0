//! Width sections searched by sectioned policies.

use crate::policy::Sectioning;
use u_loading_core::geometry::EPSILON;

/// Which part of the container width a section covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The whole width.
    Full,
    /// `[0, boundary)`.
    Large,
    /// A band around the boundary.
    Bridge,
    /// `[boundary, width)`.
    Small,
}

/// An x range an item must lie entirely within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Which section this is.
    pub kind: SectionKind,
    /// Lower x bound.
    pub x_min: f64,
    /// Upper x bound.
    pub x_max: f64,
}

impl Section {
    /// Creates a section.
    pub fn new(kind: SectionKind, x_min: f64, x_max: f64) -> Self {
        Self { kind, x_min, x_max }
    }

    /// Returns the section width.
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).max(0.0)
    }

    /// Checks whether an extent `dx` at `x` lies inside the section.
    pub fn fits(&self, x: f64, dx: f64) -> bool {
        x >= self.x_min - EPSILON && x + dx <= self.x_max + EPSILON
    }
}

/// Section kinds in search order.
///
/// Every item searches the large section first, then the bridge, then the
/// small section, whatever its zone.
pub fn section_kinds(sectioning: Option<&Sectioning>) -> Vec<SectionKind> {
    match sectioning {
        None => vec![SectionKind::Full],
        Some(s) if s.bridge => vec![
            SectionKind::Large,
            SectionKind::Bridge,
            SectionKind::Small,
        ],
        Some(_) => vec![SectionKind::Large, SectionKind::Small],
    }
}

/// Bounds of one section for an extent of `item_width` along x.
///
/// Only the bridge depends on the width. Without sectioning every kind
/// covers the whole width.
pub fn section_bounds(
    kind: SectionKind,
    container_width: f64,
    item_width: f64,
    sectioning: Option<&Sectioning>,
) -> Section {
    let Some(sectioning) = sectioning else {
        return Section::new(SectionKind::Full, 0.0, container_width);
    };

    let boundary = sectioning.boundary(container_width);
    match kind {
        SectionKind::Full => Section::new(kind, 0.0, container_width),
        SectionKind::Large => Section::new(kind, 0.0, boundary),
        SectionKind::Small => Section::new(kind, boundary, container_width),
        SectionKind::Bridge => {
            let reach = item_width + sectioning.buffer;
            Section::new(
                kind,
                (boundary - reach).max(0.0),
                (boundary + reach).min(container_width),
            )
        }
    }
}

/// Sections to search, in order, for an item of the given width.
///
/// Without sectioning the whole width is a single section.
pub fn sections(
    container_width: f64,
    item_width: f64,
    sectioning: Option<&Sectioning>,
) -> Vec<Section> {
    section_kinds(sectioning)
        .into_iter()
        .map(|kind| section_bounds(kind, container_width, item_width, sectioning))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsectioned() {
        let s = sections(100.0, 10.0, None);
        assert_eq!(s, vec![Section::new(SectionKind::Full, 0.0, 100.0)]);
    }

    #[test]
    fn test_sections_with_bridge() {
        let s = sections(100.0, 10.0, Some(&Sectioning::with_bridge()));
        let kinds: Vec<SectionKind> = s.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Large, SectionKind::Bridge, SectionKind::Small]
        );
        assert_eq!(s[0].x_max, 70.0);
        assert_eq!((s[1].x_min, s[1].x_max), (50.0, 90.0));
        assert_eq!((s[2].x_min, s[2].x_max), (70.0, 100.0));
    }

    #[test]
    fn test_bridge_is_clamped() {
        let s = sections(20.0, 30.0, Some(&Sectioning::with_bridge()));
        assert_eq!((s[1].x_min, s[1].x_max), (0.0, 20.0));
    }

    #[test]
    fn test_bridge_follows_extent() {
        let sectioning = Sectioning::with_bridge();
        let narrow = section_bounds(SectionKind::Bridge, 100.0, 5.0, Some(&sectioning));
        let wide = section_bounds(SectionKind::Bridge, 100.0, 40.0, Some(&sectioning));
        assert_eq!((narrow.x_min, narrow.x_max), (55.0, 85.0));
        assert_eq!((wide.x_min, wide.x_max), (20.0, 100.0));
        assert!(wide.fits(45.0, 40.0));
        assert!(!narrow.fits(45.0, 40.0));
    }

    #[test]
    fn test_sections_without_bridge() {
        let s = sections(100.0, 10.0, Some(&Sectioning::without_bridge()));
        assert_eq!(s.len(), 2);
        assert!(s[0].fits(60.0, 10.0));
        assert!(!s[0].fits(61.0, 10.0));
        assert!(s[1].fits(70.0, 30.0));
    }
}
