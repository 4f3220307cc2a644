//! Inventory building: group splitting and packing geometry.
//!
//! Phase 0 buckets cases by group tag and splits tags whose members have
//! non-uniform dimensions or stacking policy, so every downstream phase
//! may assume dimensional uniformity within a group. Phase 1 resolves the
//! packing orientation and per-group row geometry.

use crate::rotation::{packing_orientation, Orientation};
use crate::wall::Column;
use wallplan_core::{Case, Diagnostics};

/// A set of cases sharing group tag, dimensions and stacking policy.
#[derive(Debug, Clone)]
pub struct InventoryGroup {
    /// Group name; synthetic suffixed form when the tag was split.
    pub name: String,
    /// Department tag.
    pub dept: String,
    /// Resolved width after the rotation oracle, inches.
    pub width: f64,
    /// Resolved depth, inches.
    pub depth: f64,
    /// Case height, inches.
    pub height: f64,
    /// Net rotation of the resolved orientation, degrees.
    pub rotation: f64,
    /// Whether members may stack.
    pub stackable: bool,
    /// Stack count bound when stackable.
    pub max_stack: u32,
    /// Floor-panel groups are laid before any wall.
    pub is_floor: bool,
    /// Whether the oracle may swap width and depth.
    pub allow_rotation: bool,
    /// Remaining member cases, dequeued front-first as columns form.
    pub cases: Vec<Case>,
    /// Cases per row at the resolved orientation.
    pub per_row: u32,
    /// Estimated full rows at the resolved orientation.
    pub rows: u32,
}

impl InventoryGroup {
    /// Effective stack count.
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }

    /// Number of columns the remaining cases can still form.
    pub fn columns_left(&self) -> u32 {
        let limit = self.stack_limit() as usize;
        self.cases.len().div_ceil(limit) as u32
    }

    /// Dequeues up to `stack_limit` cases into a column, or fewer of them
    /// when capped.
    pub fn take_column(&mut self, cap: Option<u32>) -> Option<Column> {
        if self.cases.is_empty() {
            return None;
        }
        let take = self
            .stack_limit()
            .min(cap.unwrap_or(u32::MAX))
            .max(1)
            .min(self.cases.len() as u32) as usize;
        let cases: Vec<Case> = self.cases.drain(..take).collect();
        Some(Column {
            group: self.name.clone(),
            dept: self.dept.clone(),
            width: self.width,
            depth: self.depth,
            height: self.height,
            rotation: self.rotation,
            cases,
            x_off: 0.0,
        })
    }

    /// Returns a column's cases to the front of the queue, preserving order.
    pub fn untake(&mut self, column: Column) {
        for case in column.cases.into_iter().rev() {
            self.cases.insert(0, case);
        }
    }

    /// Swaps width and depth, toggling the net rotation.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.depth);
        self.rotation = if self.rotation == 90.0 { 0.0 } else { 90.0 };
    }

    /// Recomputes the row geometry for the current orientation.
    pub fn refresh_geometry(&mut self, truck_width: f64) {
        self.per_row = if self.width > 0.0 {
            (truck_width / self.width).floor() as u32
        } else {
            0
        };
        let columns = self.columns_left();
        self.rows = if self.per_row == 0 {
            columns
        } else {
            columns.div_ceil(self.per_row)
        };
    }
}

/// Strips the synthetic dimension suffix from a split group tag.
///
/// `"Alpha (31x29x36)"` becomes `"Alpha"`; tags without a well-formed
/// suffix are returned unchanged. Lookup by group tag should try the
/// exact tag first and this base form second.
pub fn base_group_tag(tag: &str) -> &str {
    let Some(open) = tag.rfind(" (") else {
        return tag;
    };
    let inner = &tag[open + 2..];
    let Some(inner) = inner.strip_suffix(')') else {
        return tag;
    };
    let mut parts = inner.split('x');
    let well_formed = parts.clone().count() == 3
        && parts.all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if well_formed {
        &tag[..open]
    } else {
        tag
    }
}

fn dims_suffix(width: f64, depth: f64, height: f64) -> String {
    format!(
        "({:.0}x{:.0}x{:.0})",
        width.round(),
        depth.round(),
        height.round()
    )
}

type PolicyKey = (u64, u64, u64, bool, u32, bool);

fn policy_key(case: &Case) -> PolicyKey {
    (
        case.width.to_bits(),
        case.depth.to_bits(),
        case.height.to_bits(),
        case.stackable,
        case.max_stack,
        case.allow_rotation,
    )
}

/// Phase 0: buckets cases by group tag and splits mixed-dimension tags
/// into one group per dimension triple, with synthetic suffixed names.
pub fn split_groups(cases: Vec<Case>, diag: &mut Diagnostics) -> Vec<InventoryGroup> {
    // Bucket by tag in first-appearance order.
    let mut tags: Vec<(String, Vec<Case>)> = Vec::new();
    for case in cases {
        match tags.iter_mut().find(|(t, _)| *t == case.group) {
            Some((_, bucket)) => bucket.push(case),
            None => tags.push((case.group.clone(), vec![case])),
        }
    }

    let mut groups: Vec<InventoryGroup> = Vec::new();
    for (tag, bucket) in tags {
        // Partition the tag by dimension/policy, insertion-ordered.
        let mut variants: Vec<(PolicyKey, Vec<Case>)> = Vec::new();
        for case in bucket {
            let key = policy_key(&case);
            match variants.iter_mut().find(|(k, _)| *k == key) {
                Some((_, v)) => v.push(case),
                None => variants.push((key, vec![case])),
            }
        }

        let distinct_dims = {
            let mut dims: Vec<(u64, u64, u64)> = Vec::new();
            for ((w, d, h, ..), _) in &variants {
                if !dims.contains(&(*w, *d, *h)) {
                    dims.push((*w, *d, *h));
                }
            }
            dims.len()
        };

        if distinct_dims > 1 {
            diag.note(
                "split",
                format!("group '{}' has {} dimension variants", tag, distinct_dims),
            );
        }

        for (_, members) in variants {
            let first = &members[0];
            let name = if distinct_dims > 1 {
                format!(
                    "{} {}",
                    tag,
                    dims_suffix(first.width, first.depth, first.height)
                )
            } else {
                tag.clone()
            };
            groups.push(InventoryGroup {
                name,
                dept: first.dept.clone(),
                width: first.width,
                depth: first.depth,
                height: first.height,
                rotation: first.rotation,
                stackable: first.stackable,
                max_stack: first.max_stack,
                is_floor: first.is_floor,
                allow_rotation: first.allow_rotation,
                cases: members,
                per_row: 0,
                rows: 0,
            });
        }
    }
    groups
}

/// Phase 1: applies the packing-fit rotation oracle and computes each
/// group's row geometry.
pub fn resolve_inventory(
    groups: &mut [InventoryGroup],
    truck_width: f64,
    diag: &mut Diagnostics,
) {
    for group in groups.iter_mut() {
        if packing_orientation(group.width, group.depth, group.allow_rotation, truck_width)
            == Orientation::Swap
        {
            group.rotate();
            diag.note(
                "inventory",
                format!(
                    "rotated '{}' to {}x{} for row fill",
                    group.name, group.width, group.depth
                ),
            );
        }
        group.refresh_geometry(truck_width);
        diag.note(
            "inventory",
            format!(
                "'{}': {}/row over ~{} row(s), stack depth {}",
                group.name,
                group.per_row,
                group.rows,
                group.stack_limit()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag() -> Diagnostics {
        Diagnostics::new()
    }

    #[test]
    fn test_uniform_group_keeps_tag() {
        let cases = vec![
            Case::new("a", 30.0, 24.0, 40.0).with_group("Amps"),
            Case::new("b", 30.0, 24.0, 40.0).with_group("Amps"),
        ];
        let groups = split_groups(cases, &mut diag());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Amps");
        assert_eq!(groups[0].cases.len(), 2);
    }

    #[test]
    fn test_mixed_dims_split_with_suffix() {
        let cases = vec![
            Case::new("a", 31.0, 29.0, 36.0).with_group("Alpha"),
            Case::new("b", 24.0, 20.0, 30.0).with_group("Alpha"),
            Case::new("c", 31.0, 29.0, 36.0).with_group("Alpha"),
        ];
        let groups = split_groups(cases, &mut diag());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Alpha (31x29x36)");
        assert_eq!(groups[1].name, "Alpha (24x20x30)");
        assert_eq!(groups[0].cases.len(), 2);
        assert_eq!(groups[1].cases.len(), 1);
    }

    #[test]
    fn test_base_group_tag_round_trip() {
        assert_eq!(base_group_tag("Alpha (31x29x36)"), "Alpha");
        assert_eq!(base_group_tag("Alpha"), "Alpha");
        assert_eq!(base_group_tag("Beta (3x4)"), "Beta (3x4)");
        assert_eq!(base_group_tag("Gamma (axbxc)"), "Gamma (axbxc)");
        assert_eq!(base_group_tag("Paren (31x29x36"), "Paren (31x29x36");
    }

    #[test]
    fn test_resolve_inventory_rotates_for_fill() {
        let cases = vec![Case::new("a", 50.0, 20.0, 40.0).with_group("Long"); 4];
        let mut groups = split_groups(cases, &mut diag());
        resolve_inventory(&mut groups, 98.0, &mut diag());

        let g = &groups[0];
        assert_eq!(g.width, 20.0);
        assert_eq!(g.depth, 50.0);
        assert_eq!(g.rotation, 90.0);
        assert_eq!(g.per_row, 4);
        assert_eq!(g.rows, 1);
    }

    #[test]
    fn test_take_column_respects_stack_limit() {
        let cases = vec![Case::new("a", 30.0, 24.0, 40.0).with_max_stack(2); 5];
        let mut groups = split_groups(cases, &mut diag());
        let g = &mut groups[0];

        let col = g.take_column(None).unwrap();
        assert_eq!(col.count(), 2);
        assert_eq!(g.cases.len(), 3);
        assert_eq!(g.columns_left(), 2);

        let last = loop {
            let c = g.take_column(None).unwrap();
            if g.cases.is_empty() {
                break c;
            }
        };
        assert_eq!(last.count(), 1);
    }

    #[test]
    fn test_untake_restores_order() {
        let cases: Vec<Case> = (0..4)
            .map(|i| Case::new(format!("n{}", i), 30.0, 24.0, 40.0).with_group("G"))
            .collect();
        let mut groups = split_groups(cases, &mut diag());
        let g = &mut groups[0];

        let col = g.take_column(None).unwrap();
        g.untake(col);
        let names: Vec<&str> = g.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["n0", "n1", "n2", "n3"]);
    }
}
