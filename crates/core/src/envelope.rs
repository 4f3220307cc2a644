//! Truck cargo hold envelope.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default interior width of a North American trailer, inches.
pub const DEFAULT_TRUCK_WIDTH: f64 = 98.0;

/// Default interior height, inches.
pub const DEFAULT_TRUCK_HEIGHT: f64 = 110.0;

/// Default interior length (53-foot trailer), inches.
pub const DEFAULT_TRUCK_LENGTH: f64 = 636.0;

/// The rectangular cargo hold.
///
/// Coordinate convention: x runs across the truck in `[0, width]`, y runs
/// from the cab (y = 0) to the door (y = length), z runs from the floor
/// (z = 0) upward. A height of zero means the height is unenforced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TruckEnvelope {
    /// Interior width in inches.
    pub width: f64,
    /// Interior length in inches.
    pub length: f64,
    /// Interior height in inches (0 = unenforced).
    pub height: f64,
}

impl TruckEnvelope {
    /// Creates an envelope with the given interior dimensions.
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    /// Returns whether the height limit is enforced.
    pub fn enforces_height(&self) -> bool {
        self.height > 0.0
    }

    /// Floor area in square inches.
    pub fn floor_area(&self) -> f64 {
        self.width * self.length
    }

    /// Validates the envelope.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.length <= 0.0 {
            return Err(Error::InvalidEnvelope(format!(
                "width and length must be positive ({} x {})",
                self.width, self.length
            )));
        }
        if self.height < 0.0 {
            return Err(Error::InvalidEnvelope(format!(
                "height must not be negative ({})",
                self.height
            )));
        }
        Ok(())
    }
}

impl Default for TruckEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_TRUCK_WIDTH, DEFAULT_TRUCK_LENGTH, DEFAULT_TRUCK_HEIGHT)
    }
}
