//! Placement output records.

use crate::case::CaseId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One case fixed at an exact position inside the cargo hold.
///
/// x runs across the truck, y from cab to door, z upward; all extents in
/// inches. `stage_index` is -1 for spillover-recovery walls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Display name of the case.
    pub name: String,
    /// Case identifier.
    pub case_id: CaseId,
    /// Group tag the case packed under (possibly a split-suffixed name).
    pub group: String,
    /// Department tag.
    pub dept: String,
    /// Left edge, inches from the driver-side wall.
    pub x: f64,
    /// Front edge, inches from the cab.
    pub y: f64,
    /// Bottom edge, inches from the floor.
    pub z: f64,
    /// Placed width.
    pub width: f64,
    /// Placed depth.
    pub depth: f64,
    /// Placed height.
    pub height: f64,
    /// Rotation applied, degrees (0 or 90).
    pub rotation: f64,
    /// Identifier of the owning wall.
    pub wall_id: String,
    /// Stage index of the owning wall (-1 for spillover).
    pub stage_index: i32,
}

impl Placement {
    /// Right edge (x + width).
    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    /// Door-side edge (y + depth).
    pub fn y_max(&self) -> f64 {
        self.y + self.depth
    }

    /// Top edge (z + height).
    pub fn z_max(&self) -> f64 {
        self.z + self.height
    }

    /// Volume in cubic inches.
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Placement {
        Placement {
            name: "Amp Rack".into(),
            case_id: "c0".into(),
            group: "Amps".into(),
            dept: "SON".into(),
            x: 10.0,
            y: 20.0,
            z: 30.0,
            width: 30.0,
            depth: 24.0,
            height: 40.0,
            rotation: 0.0,
            wall_id: "wp_0".into(),
            stage_index: 0,
        }
    }

    #[test]
    fn test_placement_extents() {
        let p = sample();
        assert_eq!(p.x_max(), 40.0);
        assert_eq!(p.y_max(), 44.0);
        assert_eq!(p.z_max(), 70.0);
        assert_eq!(p.volume(), 28800.0);
    }
}
