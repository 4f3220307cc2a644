//! Department priority table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapping from department tag to a small positive priority.
///
/// Lower priority rides closer to the cab. The table is insertion-ordered:
/// iteration and the priorities handed to unseen tags depend only on the
/// order departments were observed, never on hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeptPriority {
    entries: Vec<(String, u32)>,
}

impl DeptPriority {
    /// Creates an empty table.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates the table seeded with the standard touring departments.
    pub fn seeded() -> Self {
        let mut table = Self::empty();
        for (i, dept) in ["LX", "SON", "CARP", "VDO", "PROPS", "COST", "ADM"]
            .iter()
            .enumerate()
        {
            table.entries.push((dept.to_string(), i as u32 + 1));
        }
        table
    }

    /// Records a department, appending it after all known tags if unseen.
    /// Returns its priority.
    pub fn observe(&mut self, dept: &str) -> u32 {
        if let Some(p) = self.priority(dept) {
            return p;
        }
        let next = self
            .entries
            .iter()
            .map(|(_, p)| *p)
            .max()
            .unwrap_or(0)
            + 1;
        self.entries.push((dept.to_string(), next));
        next
    }

    /// Looks up a department's priority.
    pub fn priority(&self, dept: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(d, _)| d == dept)
            .map(|(_, p)| *p)
    }

    /// Looks up a priority, placing unknown departments after all known ones.
    pub fn priority_or_last(&self, dept: &str) -> u32 {
        self.priority(dept).unwrap_or_else(|| {
            self.entries.iter().map(|(_, p)| *p).max().unwrap_or(0) + 1
        })
    }

    /// Number of known departments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no departments are known.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates departments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(d, p)| (d.as_str(), *p))
    }
}

impl Default for DeptPriority {
    fn default() -> Self {
        Self::seeded()
    }
}
