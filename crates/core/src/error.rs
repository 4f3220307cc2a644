//! Error types for the load planner.

use thiserror::Error;

/// Errors produced by the planner.
///
/// Packing infeasibility is never an error: a load that exceeds the truck
/// length is emitted in full and observed through [`crate::SolvePlan::total_depth`].
#[derive(Debug, Error)]
pub enum Error {
    /// A case carried a non-positive dimension or was otherwise unusable.
    #[error("invalid case: {0}")]
    InvalidCase(String),

    /// The truck envelope had a non-positive width or length.
    #[error("invalid truck envelope: {0}")]
    InvalidEnvelope(String),

    /// An algorithmic invariant was breached.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the planner crates.
pub type Result<T> = std::result::Result<T, Error>;
