//! Solver trait and configuration.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::result::PackingResult;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placement policy used by the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackingMethod {
    /// Bottom-Left Fill over all 6 orientations (randomized orderings).
    #[default]
    BottomLeftFill,
    /// Back-to-front contact-area best fit in width sections.
    BackToFrontBestFit,
    /// First fit with full support, in width sections.
    StrictSupportSubvolume,
}

impl PackingMethod {
    /// All methods, in comparison order.
    pub const ALL: [PackingMethod; 3] = [
        PackingMethod::BottomLeftFill,
        PackingMethod::BackToFrontBestFit,
        PackingMethod::StrictSupportSubvolume,
    ];

    /// Short identifier used on the command line and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            PackingMethod::BottomLeftFill => "blf",
            PackingMethod::BackToFrontBestFit => "best-fit",
            PackingMethod::StrictSupportSubvolume => "subvolume",
        }
    }

    /// Ordering used when the config does not set one.
    pub fn default_ordering(&self) -> OrderingStrategy {
        match self {
            PackingMethod::BottomLeftFill => OrderingStrategy::ZoneShuffled,
            PackingMethod::BackToFrontBestFit | PackingMethod::StrictSupportSubvolume => {
                OrderingStrategy::ZoneDescendingVolumeDescending
            }
        }
    }

    /// Iteration count used when the config does not set one.
    pub fn default_iterations(&self) -> usize {
        match self {
            PackingMethod::BottomLeftFill => 10,
            PackingMethod::BackToFrontBestFit | PackingMethod::StrictSupportSubvolume => 1,
        }
    }
}

impl fmt::Display for PackingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "blf" | "bottom-left-fill" | "bottomleftfill" => Ok(PackingMethod::BottomLeftFill),
            "best-fit" | "bestfit" | "back-to-front-best-fit" | "backtofrontbestfit" => {
                Ok(PackingMethod::BackToFrontBestFit)
            }
            "subvolume" | "strict-support-subvolume" | "strictsupportsubvolume" => {
                Ok(PackingMethod::StrictSupportSubvolume)
            }
            other => Err(Error::InvalidConfig(format!(
                "Unknown packing method '{}' (expected blf, best-fit or subvolume)",
                other
            ))),
        }
    }
}

/// Item ordering explored by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderingStrategy {
    /// Sort by zone, shuffle within each zone.
    ZoneShuffled,
    /// Largest dimension first.
    MaxDimensionDescending,
    /// Zone rank descending, then volume descending.
    ZoneDescendingVolumeDescending,
    /// Zone rank ascending, then volume descending.
    ZoneAscendingVolumeDescending,
}

impl OrderingStrategy {
    /// Returns true if the ordering draws from a random source.
    pub fn is_randomized(&self) -> bool {
        matches!(self, OrderingStrategy::ZoneShuffled)
    }
}

impl fmt::Display for OrderingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderingStrategy::ZoneShuffled => "zone-shuffled",
            OrderingStrategy::MaxDimensionDescending => "max-dimension-desc",
            OrderingStrategy::ZoneDescendingVolumeDescending => "zone-desc-volume-desc",
            OrderingStrategy::ZoneAscendingVolumeDescending => "zone-asc-volume-desc",
        };
        f.write_str(name)
    }
}

impl FromStr for OrderingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "zone-shuffled" | "shuffled" => Ok(OrderingStrategy::ZoneShuffled),
            "max-dimension-desc" | "max-dimension" => Ok(OrderingStrategy::MaxDimensionDescending),
            "zone-desc-volume-desc" | "zone-desc" => {
                Ok(OrderingStrategy::ZoneDescendingVolumeDescending)
            }
            "zone-asc-volume-desc" | "zone-asc" => {
                Ok(OrderingStrategy::ZoneAscendingVolumeDescending)
            }
            other => Err(Error::InvalidConfig(format!(
                "Unknown ordering strategy '{}'",
                other
            ))),
        }
    }
}

/// Packing configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Placement policy.
    pub method: PackingMethod,

    /// Item ordering; the method's default when `None`.
    pub ordering: Option<OrderingStrategy>,

    /// Optimizer iterations; the method's default when `None`.
    pub iterations: Option<usize>,

    /// Lattice step for the x/y position scan.
    pub scan_step: f64,

    /// Seed for randomized orderings. Runs are reproducible when set.
    pub seed: Option<u64>,

    /// Run optimizer iterations on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            method: PackingMethod::default(),
            ordering: None,
            iterations: None,
            scan_step: 1.0,
            seed: None,
            parallel: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the packing method.
    pub fn with_method(mut self, method: PackingMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the item ordering.
    pub fn with_ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Sets the number of optimizer iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the position scan step.
    pub fn with_scan_step(mut self, step: f64) -> Self {
        self.scan_step = step;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables parallel iterations.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the ordering in effect.
    pub fn effective_ordering(&self) -> OrderingStrategy {
        self.ordering
            .unwrap_or_else(|| self.method.default_ordering())
    }

    /// Returns the number of iterations that will actually run.
    ///
    /// Deterministic orderings always run once.
    pub fn effective_iterations(&self) -> usize {
        if self.effective_ordering().is_randomized() {
            self.iterations
                .unwrap_or_else(|| self.method.default_iterations())
        } else {
            1
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.scan_step.is_finite() || self.scan_step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "Scan step must be positive (got {})",
                self.scan_step
            )));
        }
        if self.iterations == Some(0) {
            return Err(Error::InvalidConfig(
                "Iteration count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Trait for packing solvers.
pub trait Solver {
    /// Packs the items into the container.
    fn solve(&self, items: &[Item], container: &Container) -> Result<PackingResult>;
}
