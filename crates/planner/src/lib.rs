//! # WallPlan Planner
//!
//! Deterministic wall-by-wall load planner for truck packing.
//!
//! The planner arranges a heterogeneous inventory of rectangular cases
//! inside a rectangular cargo hold so that the load is stable for
//! highway transit, depth-efficient, and strappable: each transverse
//! wall presents a nearly flat door-facing surface.
//!
//! ## Pipeline
//!
//! The solve is a fixed sequence of phases over three staged collections
//! (inventory groups, the wall pool, the ordered stages); no phase is
//! re-entered:
//!
//! 1. Split mixed-dimension groups and resolve packing orientations
//! 2. Lay floor-panel walls with load bars between rows
//! 3. Build single-group full walls; top them up with gap fill
//! 4. Rescue orphans with depth-grouped first-fit-decreasing
//! 5. Consolidate weak walls by absorption and column-level rebuild
//! 6. Score and stage walls from cab to door
//! 7. Emit coordinates; recover spillovers at the door end
//! 8. Validate bounds, overlap and flat faces (observational)
//!
//! ## Example
//!
//! ```
//! use wallplan_core::{Case, Config, TruckEnvelope};
//! use wallplan_planner::WallPlanner;
//!
//! let cases = vec![
//!     Case::new("Amp Rack", 30.0, 30.0, 40.0).with_dept("SON").with_group("Amps"),
//!     Case::new("Dimmer", 24.0, 30.0, 36.0).with_dept("LX").with_group("Dimmers"),
//! ];
//! let envelope = TruckEnvelope::default();
//!
//! let plan = WallPlanner::new(Config::default())
//!     .solve(&cases, &envelope)
//!     .unwrap();
//! for section in &plan.sections {
//!     println!("{} {}..{}", section.label, section.y_start, section.y_end);
//! }
//! ```

pub mod consolidate;
pub mod emit;
pub mod floor;
pub mod full_wall;
pub mod inventory;
pub mod ordering;
pub mod orphan;
pub mod planner;
pub mod rotation;
pub mod validate;
pub mod wall;

// Re-exports
pub use inventory::{base_group_tag, InventoryGroup};
pub use ordering::StagedWall;
pub use planner::WallPlanner;
pub use rotation::Orientation;
pub use wall::{Column, Reliability, Wall};
pub use wallplan_core::{
    Case, Config, Diagnostics, Error, Placement, Result, SolvePlan, SolveSummary, TruckEnvelope,
    Violation, ViolationKind, WallSection,
};
