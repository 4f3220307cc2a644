//! Reserved knowledge-base wall recipes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A precomputed multi-group wall template.
///
/// The planner reserves a hook for matching these but does not implement
/// it: solving with a non-empty pattern list logs a warning and proceeds
/// as if the list were empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KbPattern {
    /// Recipe name.
    pub name: String,
    /// Group tags the recipe combines.
    pub group_tags: Vec<String>,
}

impl KbPattern {
    /// Creates a pattern from a name and its group tags.
    pub fn new(name: impl Into<String>, group_tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            group_tags,
        }
    }
}
