//! Planner configuration and tuning constants.

use crate::dept::DeptPriority;
use crate::kb::KbPattern;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum width-fill ratio for a wall to count as a full wall.
pub const WP_MIN_FILL: f64 = 0.80;

/// Full walls below this fill ratio accept gap-fill columns.
pub const WP_GAP_THRESH: f64 = 0.95;

/// Strict depth-compatibility tolerance, inches.
pub const WP_DEPTH_STRICT: f64 = 2.0;

/// Relaxed depth-compatibility tolerance (the flat-face limit), inches.
pub const WP_DEPTH_RELAXED: f64 = 8.0;

/// Depth consumed by a load bar between floor-panel walls, inches.
pub const WP_LOADBAR_GAP: f64 = 2.0;

/// Max-height spread tolerated inside one stage, inches.
pub const WP_STAGE_HEIGHT_TOL: f64 = 15.0;

/// Walls below this fill ratio are dissolved into stronger neighbours.
pub const WP_ABSORB_THRESH: f64 = 0.50;

/// Width slack tolerated when merging columns into an existing wall, inches.
pub const WP_WIDTH_SLACK: f64 = 0.5;

/// Configuration for the wall planner.
///
/// The tuning constants default to the values above. They are part of the
/// observable contract: changing them changes placement output.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Minimum fill ratio for a full wall.
    pub min_fill: f64,

    /// Fill ratio below which full walls accept gap-fill columns.
    pub gap_threshold: f64,

    /// Strict depth clustering tolerance, inches.
    pub depth_strict: f64,

    /// Relaxed depth clustering tolerance, inches.
    pub depth_relaxed: f64,

    /// Load-bar depth between floor walls, inches.
    pub load_bar_gap: f64,

    /// Max-height spread tolerated inside one stage, inches.
    pub stage_height_tol: f64,

    /// Fill ratio below which walls are dissolved and absorbed.
    pub absorb_threshold: f64,

    /// Department priority table; lower rides closer to the cab.
    pub dept_priority: DeptPriority,

    /// Reserved knowledge-base wall recipes. The planner only supports an
    /// empty list; a non-empty list is ignored with a warning.
    pub kb_patterns: Vec<KbPattern>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_fill: WP_MIN_FILL,
            gap_threshold: WP_GAP_THRESH,
            depth_strict: WP_DEPTH_STRICT,
            depth_relaxed: WP_DEPTH_RELAXED,
            load_bar_gap: WP_LOADBAR_GAP,
            stage_height_tol: WP_STAGE_HEIGHT_TOL,
            absorb_threshold: WP_ABSORB_THRESH,
            dept_priority: DeptPriority::seeded(),
            kb_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum full-wall fill ratio.
    pub fn with_min_fill(mut self, ratio: f64) -> Self {
        self.min_fill = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the gap-fill threshold.
    pub fn with_gap_threshold(mut self, ratio: f64) -> Self {
        self.gap_threshold = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the absorb threshold.
    pub fn with_absorb_threshold(mut self, ratio: f64) -> Self {
        self.absorb_threshold = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the department priority table.
    pub fn with_dept_priority(mut self, table: DeptPriority) -> Self {
        self.dept_priority = table;
        self
    }

    /// Sets the knowledge-base pattern list.
    pub fn with_kb_patterns(mut self, patterns: Vec<KbPattern>) -> Self {
        self.kb_patterns = patterns;
        self
    }
}
