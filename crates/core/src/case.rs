//! Case definitions and ingestion defaults.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to a case at ingestion.
pub type CaseId = String;

/// Department tag used when a case declares none.
pub const DEFAULT_DEPT: &str = "GENERAL";

/// A single physical item: a flight case, road box or freight piece.
///
/// Dimensions are in inches. A case is never mutated after ingestion; the
/// planner moves it through an inventory group and a column into exactly
/// one placement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Case {
    /// Identifier, assigned by the planner at ingestion when empty.
    pub id: CaseId,
    /// Display name.
    pub name: String,
    /// Base width in inches (across the truck).
    pub width: f64,
    /// Base depth in inches (along the truck).
    pub depth: f64,
    /// Height in inches.
    pub height: f64,
    /// Department tag.
    pub dept: String,
    /// Group tag; cases sharing a tag pack together.
    pub group: String,
    /// Whether identical cases may stack on top of this one.
    pub stackable: bool,
    /// Maximum stack count when stackable.
    pub max_stack: u32,
    /// Floor panels are laid as substrate before any wall.
    pub is_floor: bool,
    /// Whether the planner may swap width and depth.
    pub allow_rotation: bool,
    /// Preset rotation in degrees (0 or 90).
    pub rotation: f64,
}

impl Case {
    /// Creates a case with ingestion defaults: dept `"GENERAL"`, group equal
    /// to the name, not stackable, rotation allowed.
    pub fn new(name: impl Into<String>, width: f64, depth: f64, height: f64) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            group: name.clone(),
            name,
            width,
            depth,
            height,
            dept: DEFAULT_DEPT.to_string(),
            stackable: false,
            max_stack: 1,
            is_floor: false,
            allow_rotation: true,
            rotation: 0.0,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<CaseId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the department tag.
    pub fn with_dept(mut self, dept: impl Into<String>) -> Self {
        self.dept = dept.into();
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Allows stacking up to `max_stack` cases high.
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.stackable = max_stack > 1;
        self.max_stack = max_stack.max(1);
        self
    }

    /// Marks the case as a floor panel.
    pub fn floor_panel(mut self) -> Self {
        self.is_floor = true;
        self
    }

    /// Forbids swapping width and depth.
    pub fn fixed_orientation(mut self) -> Self {
        self.allow_rotation = false;
        self
    }

    /// Sets a preset rotation (90 degrees swaps width and depth at ingestion).
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Effective stack count: 1 unless the case is stackable.
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }

    /// Footprint area in square inches.
    pub fn footprint(&self) -> f64 {
        self.width * self.depth
    }

    /// Validates the dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.depth <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidCase(format!(
                "{}: dimensions must be positive ({} x {} x {})",
                self.name, self.width, self.depth, self.height
            )));
        }
        Ok(())
    }
}
