//! Phase 2: single-group full walls. Phase 2.5: gap fill.
//!
//! Each group first tries to form dense single-group grids. A candidate
//! wall below the minimum fill is not built at all; its cases stay in the
//! group, which then acts as an orphan pool for the rescue phases.

use crate::inventory::InventoryGroup;
use crate::wall::{Reliability, Wall};
use wallplan_core::{Config, Diagnostics};

/// Phase 2: builds greedy left-to-right walls per non-floor group.
///
/// Cases left in a group afterwards form that group's orphan pool.
pub fn build_full_walls(
    groups: &mut [InventoryGroup],
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) -> Vec<Wall> {
    let mut walls = Vec::new();

    for group in groups.iter_mut().filter(|g| !g.is_floor) {
        let mut built = 0;
        while !group.cases.is_empty() {
            // The first column always fits; oversize cases must reach the
            // emitter to be recovered as spillover.
            let row_cap = group.per_row.max(1);
            let n_cols = row_cap.min(group.columns_left());
            let width_fill = n_cols as f64 * group.width;

            if width_fill / truck_width < config.min_fill {
                break;
            }

            let mut wall = Wall::new(Reliability::FullWall);
            for _ in 0..n_cols {
                match group.take_column(None) {
                    Some(column) => wall.push_column(column),
                    None => break,
                }
            }
            built += 1;
            walls.push(wall);

            // Stop once the leftovers can no longer fill a wall.
            let next_fill = group.columns_left().min(row_cap) as f64 * group.width;
            if next_fill / truck_width < config.min_fill {
                break;
            }
        }

        if built > 0 || !group.cases.is_empty() {
            diag.note(
                "full-walls",
                format!(
                    "'{}': {} full wall(s), {} case(s) to orphan pool",
                    group.name,
                    built,
                    group.cases.len()
                ),
            );
        }
    }

    walls
}

/// Phase 2.5: tops up underfilled full walls with depth-compatible
/// orphan columns from the same department.
///
/// Any appended column demotes the wall to [`Reliability::TightFit`].
pub fn gap_fill(
    walls: &mut [Wall],
    pools: &mut [InventoryGroup],
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) {
    for wall in walls.iter_mut().filter(|w| !w.is_floor) {
        if wall.fill_ratio(truck_width) >= config.gap_threshold {
            continue;
        }

        let dept = wall.majority_dept();
        let mut appended = 0;
        for pool in pools.iter_mut() {
            if pool.is_floor || pool.cases.is_empty() || pool.dept != dept {
                continue;
            }
            if wall.depth().max(pool.depth) - wall.min_depth().min(pool.depth)
                > config.depth_relaxed
            {
                continue;
            }
            while !pool.cases.is_empty()
                && truck_width - wall.width_fill() >= pool.width - 0.5
            {
                if let Some(column) = pool.take_column(None) {
                    wall.push_column(column);
                    appended += 1;
                }
            }
        }

        if appended > 0 {
            wall.demote(Reliability::TightFit);
            diag.note(
                "gap-fill",
                format!(
                    "wall of {:?} took {} orphan column(s), now {:.1}% filled",
                    wall.group_tags(),
                    appended,
                    wall.fill_ratio(truck_width) * 100.0
                ),
            );
        }
    }
}
