//! # WallPlan Core
//!
//! Core data model, configuration and result types for the WallPlan truck
//! load planner.
//!
//! This crate provides the foundational types shared between the planner
//! and its callers (viewers, editors, exporters).
//!
//! ## Core Components
//!
//! - **Input model**: [`Case`], [`TruckEnvelope`], [`DeptPriority`], [`KbPattern`]
//! - **Configuration**: [`Config`] with the documented tuning constants
//! - **Output model**: [`Placement`], [`WallSection`], [`SolvePlan`], [`SolveSummary`]
//! - **Diagnostics**: [`Diagnostics`], [`Violation`], [`FlatFaceGrade`]
//!
//! ## Coordinate Convention
//!
//! x runs across the truck in `[0, width]`, y runs from the cab (y = 0) to
//! the door (y = length), z runs from the floor upward. All lengths are
//! inches.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod case;
pub mod config;
pub mod dept;
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod kb;
pub mod placement;
pub mod result;
pub mod section;

// Re-exports
pub use case::{Case, CaseId, DEFAULT_DEPT};
pub use config::{
    Config, WP_ABSORB_THRESH, WP_DEPTH_RELAXED, WP_DEPTH_STRICT, WP_GAP_THRESH, WP_LOADBAR_GAP,
    WP_MIN_FILL, WP_STAGE_HEIGHT_TOL, WP_WIDTH_SLACK,
};
pub use dept::DeptPriority;
pub use diagnostics::{Diagnostics, FlatFaceGrade, Violation, ViolationKind};
pub use envelope::{
    TruckEnvelope, DEFAULT_TRUCK_HEIGHT, DEFAULT_TRUCK_LENGTH, DEFAULT_TRUCK_WIDTH,
};
pub use error::{Error, Result};
pub use kb::KbPattern;
pub use placement::Placement;
pub use result::{SolvePlan, SolveSummary};
pub use section::WallSection;
