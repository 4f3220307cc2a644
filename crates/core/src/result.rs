//! Solve output: placements, wall sections and diagnostics.

use crate::diagnostics::Diagnostics;
use crate::envelope::TruckEnvelope;
use crate::placement::Placement;
use crate::section::WallSection;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of one planning run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolvePlan {
    /// All placements in emission order.
    pub placements: Vec<Placement>,

    /// Wall sections in emission order (cab to door, spillover last).
    pub sections: Vec<WallSection>,

    /// Diagnostic lines and violations.
    pub diagnostics: Diagnostics,
}

impl SolvePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of placed cases.
    pub fn case_count(&self) -> usize {
        self.placements.len()
    }

    /// Total truck depth consumed, inches (greatest section end).
    pub fn total_depth(&self) -> f64 {
        self.sections.iter().map(|s| s.y_end).fold(0.0, f64::max)
    }

    /// Whether the load fits the envelope's length.
    pub fn fits(&self, envelope: &TruckEnvelope) -> bool {
        self.total_depth() <= envelope.length
    }

    /// Number of distinct non-spillover stages.
    pub fn stage_count(&self) -> usize {
        let mut stages: Vec<i32> = self
            .sections
            .iter()
            .map(|s| s.stage)
            .filter(|&s| s >= 0)
            .collect();
        stages.dedup();
        stages.len()
    }

    /// Computes the aggregate summary.
    pub fn summary(&self) -> SolveSummary {
        SolveSummary::from(self)
    }
}

/// Aggregate statistics for a plan.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveSummary {
    /// Cases placed.
    pub cases_placed: usize,
    /// Cases skipped at ingestion.
    pub cases_skipped: usize,
    /// Walls emitted (including spillover walls).
    pub wall_count: usize,
    /// Distinct non-spillover stages.
    pub stage_count: usize,
    /// Total depth consumed, inches.
    pub total_depth: f64,
    /// Mean wall fill percentage.
    pub avg_fill_pct: f64,
    /// Violations reported by the validator.
    pub violation_count: usize,
}

impl From<&SolvePlan> for SolveSummary {
    fn from(plan: &SolvePlan) -> Self {
        let wall_count = plan.sections.len();
        let avg_fill_pct = if wall_count == 0 {
            0.0
        } else {
            plan.sections.iter().map(|s| s.fill_pct).sum::<f64>() / wall_count as f64
        };
        Self {
            cases_placed: plan.placements.len(),
            cases_skipped: plan.diagnostics.skipped_cases.len(),
            wall_count,
            stage_count: plan.stage_count(),
            total_depth: plan.total_depth(),
            avg_fill_pct,
            violation_count: plan.diagnostics.violations.len(),
        }
    }
}
