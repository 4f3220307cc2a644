//! Wall section output records.

use crate::placement::Placement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A wall after coordinate emission: one transverse slice of the load,
/// secured by one strapping operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WallSection {
    /// Stable wall identifier (`wp_<n>` in emission order).
    pub id: String,
    /// Human-readable label (department and reliability, or "Floor" /
    /// "Spillover").
    pub label: String,
    /// Stage index; -1 for spillover-recovery walls.
    pub stage: i32,
    /// Cab-side edge, inches.
    pub y_start: f64,
    /// Door-side edge, inches.
    pub y_end: f64,
    /// Sum of emitted column widths, inches.
    pub wall_width: f64,
    /// Width fill as a percentage of the truck width.
    pub fill_pct: f64,
    /// Placements emitted for this wall.
    pub placements: Vec<Placement>,
    /// Number of cases placed in this wall.
    pub case_count: usize,
    /// Wall depth (max column depth), inches.
    pub depth: f64,
}

impl WallSection {
    /// Depth of truck consumed by this section.
    pub fn span(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// Greatest placed height in this section.
    pub fn max_height(&self) -> f64 {
        self.placements
            .iter()
            .map(|p| p.z_max())
            .fold(0.0, f64::max)
    }
}
