//! Diagnostic log surface and post-placement violations.

use crate::case::CaseId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of post-placement violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViolationKind {
    /// A placement escapes the truck envelope beyond tolerance.
    Bounds,
    /// Two placements intersect on all three axes beyond tolerance.
    Overlap,
    /// A wall's door-facing depth range exceeds the flat-face limit.
    FlatFace,
}

/// A post-placement invariant failure.
///
/// Violations are observational: placements are returned unchanged and the
/// caller decides how to surface them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violation {
    /// Violation kind.
    pub kind: ViolationKind,
    /// One-line description.
    pub message: String,
    /// Wall involved, when known.
    pub wall_id: Option<String>,
    /// Case involved, when known.
    pub case_id: Option<CaseId>,
}

impl Violation {
    /// Creates a violation with no wall or case attribution.
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            wall_id: None,
            case_id: None,
        }
    }

    /// Attributes the violation to a wall.
    pub fn in_wall(mut self, wall_id: impl Into<String>) -> Self {
        self.wall_id = Some(wall_id.into());
        self
    }

    /// Attributes the violation to a case.
    pub fn for_case(mut self, case_id: impl Into<CaseId>) -> Self {
        self.case_id = Some(case_id.into());
        self
    }
}

/// Grade of a wall's door-facing flatness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlatFaceGrade {
    /// Depth range within the strict tolerance; a strap spans it cleanly.
    Ideal,
    /// Depth range within the relaxed tolerance.
    Acceptable,
    /// Depth range beyond the relaxed tolerance; strapping is unsafe.
    Critical,
}

impl FlatFaceGrade {
    /// Grades a depth range against the strict and relaxed tolerances.
    pub fn from_range(range: f64, strict: f64, relaxed: f64) -> Self {
        if range <= strict {
            Self::Ideal
        } else if range <= relaxed {
            Self::Acceptable
        } else {
            Self::Critical
        }
    }
}

/// Textual diagnostic surface plus structured violations.
///
/// One line per phase transition and per notable action. The line format
/// is documented but not part of the output contract.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Free-text lines in emission order.
    pub lines: Vec<String>,
    /// Structured post-placement violations.
    pub violations: Vec<Violation>,
    /// Identifiers of cases skipped at ingestion.
    pub skipped_cases: Vec<CaseId>,
}

impl Diagnostics {
    /// Creates an empty diagnostics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a phase-tagged note.
    pub fn note(&mut self, phase: &str, message: impl AsRef<str>) {
        let line = format!("[{}] {}", phase, message.as_ref());
        log::debug!("{}", line);
        self.lines.push(line);
    }

    /// Records a phase-tagged warning.
    pub fn warn(&mut self, phase: &str, message: impl AsRef<str>) {
        let line = format!("[{}] {}", phase, message.as_ref());
        log::warn!("{}", line);
        self.lines.push(line);
    }

    /// Records a violation.
    pub fn violation(&mut self, violation: Violation) {
        log::warn!("violation: {}", violation.message);
        self.violations.push(violation);
    }

    /// Records a skipped case.
    pub fn skip_case(&mut self, phase: &str, case_id: &str, reason: impl AsRef<str>) {
        self.warn(phase, format!("skipping {}: {}", case_id, reason.as_ref()));
        self.skipped_cases.push(case_id.to_string());
    }

    /// True when no violations were recorded.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations of a given kind.
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}
