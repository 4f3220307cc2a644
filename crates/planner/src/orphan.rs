//! Phase 3: orphan rescue.
//!
//! Cases that never reached a full wall are rebuilt into walls here:
//! first a reserved knowledge-base hook (3A, a stub), then the rotation-
//! aware depth-grouped first-fit-decreasing passes (3B), then a weak-wall
//! merge. Depth homogeneity comes first: pools are re-oriented for depth
//! compatibility and clustered by depth before any width packing.

use crate::inventory::InventoryGroup;
use crate::rotation::{depth_compat_orientation, Orientation};
use crate::wall::{Column, Reliability, Wall};
use wallplan_core::{Config, Diagnostics, KbPattern};

/// Phase 3A: reserved knowledge-base recipe hook.
///
/// The matching algorithm is intentionally not implemented; the planner's
/// contract only covers an empty pattern list. A non-empty list is
/// ignored with a warning.
pub fn apply_kb_patterns(patterns: &[KbPattern], diag: &mut Diagnostics) -> Vec<Wall> {
    if !patterns.is_empty() {
        diag.warn(
            "kb",
            format!(
                "{} KB pattern(s) supplied but recipe matching is not implemented; ignoring",
                patterns.len()
            ),
        );
    }
    Vec::new()
}

/// Phase 3B: rotation-aware depth-grouped FFD across departments.
///
/// Pass 1 clusters each department's pools within the strict depth
/// tolerance and keeps only walls reaching the minimum fill; dissolved
/// cases fall through to pass 2, which clusters across all departments
/// at the relaxed tolerance and keeps everything.
pub fn rescue_orphans(
    pools: &mut [InventoryGroup],
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) -> Vec<Wall> {
    reorient_for_depth(pools, truck_width, config, diag);

    let mut walls = Vec::new();

    // Pass 1: strict clusters, one department at a time.
    for dept in depts_in_order(pools) {
        let members: Vec<usize> = pool_indices(pools, |p| p.dept == dept);
        for cluster in cluster_by_depth(pools, &members, config.depth_strict) {
            let built = build_cluster_walls(
                pools,
                &cluster,
                truck_width,
                config.depth_relaxed,
                Reliability::OrphanSameDept,
                Some(config.min_fill),
            );
            if !built.is_empty() {
                diag.note(
                    "orphans",
                    format!("{}: {} strict-depth wall(s)", dept, built.len()),
                );
            }
            walls.extend(built);
        }
    }

    // Pass 2: relaxed clusters across every department.
    let members: Vec<usize> = pool_indices(pools, |_| true);
    for cluster in cluster_by_depth(pools, &members, config.depth_relaxed) {
        let built = build_cluster_walls(
            pools,
            &cluster,
            truck_width,
            config.depth_relaxed,
            Reliability::OrphanMixed,
            None,
        );
        if !built.is_empty() {
            diag.note(
                "orphans",
                format!("relaxed pass: {} mixed wall(s)", built.len()),
            );
        }
        walls.extend(built);
    }

    merge_weak_walls(&mut walls, truck_width, config, diag);
    walls
}

/// Re-runs the rotation oracle in depth-compatibility mode over every
/// pool with a remainder.
fn reorient_for_depth(
    pools: &mut [InventoryGroup],
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) {
    for i in 0..pools.len() {
        if pools[i].is_floor || pools[i].cases.is_empty() {
            continue;
        }
        let other_depths: Vec<f64> = pools
            .iter()
            .enumerate()
            .filter(|(j, p)| *j != i && !p.is_floor && !p.cases.is_empty())
            .flat_map(|(_, p)| std::iter::repeat(p.depth).take(p.cases.len()))
            .collect();

        let pool = &mut pools[i];
        if depth_compat_orientation(
            pool.width,
            pool.depth,
            pool.allow_rotation,
            truck_width,
            config.depth_relaxed,
            &other_depths,
        ) == Orientation::Swap
        {
            pool.rotate();
            pool.refresh_geometry(truck_width);
            diag.note(
                "orphans",
                format!(
                    "re-oriented '{}' to {}x{} for depth compatibility",
                    pool.name, pool.width, pool.depth
                ),
            );
        }
    }
}

/// Department tags in first-appearance order among live pools.
fn depts_in_order(pools: &[InventoryGroup]) -> Vec<String> {
    let mut depts: Vec<String> = Vec::new();
    for pool in pools.iter().filter(|p| !p.is_floor && !p.cases.is_empty()) {
        if !depts.contains(&pool.dept) {
            depts.push(pool.dept.clone());
        }
    }
    depts
}

fn pool_indices(pools: &[InventoryGroup], pred: impl Fn(&InventoryGroup) -> bool) -> Vec<usize> {
    pools
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_floor && !p.cases.is_empty() && pred(p))
        .map(|(i, _)| i)
        .collect()
}

/// Transitive depth clustering: a pool joins a cluster when its depth is
/// within `tol` of any pool already in the cluster, starting from the
/// earliest unassigned seed.
fn cluster_by_depth(pools: &[InventoryGroup], members: &[usize], tol: f64) -> Vec<Vec<usize>> {
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut assigned = vec![false; members.len()];

    for seed_pos in 0..members.len() {
        if assigned[seed_pos] {
            continue;
        }
        assigned[seed_pos] = true;
        let mut cluster = vec![members[seed_pos]];
        loop {
            let mut grew = false;
            for (pos, &idx) in members.iter().enumerate() {
                if assigned[pos] {
                    continue;
                }
                let close = cluster
                    .iter()
                    .any(|&c| (pools[c].depth - pools[idx].depth).abs() <= tol);
                if close {
                    assigned[pos] = true;
                    cluster.push(idx);
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }
        clusters.push(cluster);
    }
    clusters
}

/// Greedily builds walls from a depth cluster, widest pool first.
///
/// A column joins the open wall only while the width permits and the
/// wall's depth spread stays within the flat-face cap. When `min_fill`
/// is given, a candidate wall below it is dissolved back into its pools
/// (order preserved) and building stops for the cluster.
fn build_cluster_walls(
    pools: &mut [InventoryGroup],
    cluster: &[usize],
    truck_width: f64,
    depth_cap: f64,
    reliability: Reliability,
    min_fill: Option<f64>,
) -> Vec<Wall> {
    let mut order: Vec<usize> = cluster.to_vec();
    order.sort_by(|&a, &b| {
        pools[b]
            .width
            .partial_cmp(&pools[a].width)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut walls = Vec::new();
    while order.iter().any(|&i| !pools[i].cases.is_empty()) {
        let mut taken: Vec<(usize, Column)> = Vec::new();
        let mut width_fill = 0.0;
        let mut depth_lo = f64::INFINITY;
        let mut depth_hi = f64::NEG_INFINITY;

        for &i in &order {
            loop {
                if pools[i].cases.is_empty() {
                    break;
                }
                let fits = taken.is_empty()
                    || (width_fill + pools[i].width <= truck_width
                        && depth_hi.max(pools[i].depth) - depth_lo.min(pools[i].depth)
                            <= depth_cap);
                if !fits {
                    break;
                }
                if let Some(column) = pools[i].take_column(None) {
                    width_fill += column.width;
                    depth_lo = depth_lo.min(column.depth);
                    depth_hi = depth_hi.max(column.depth);
                    taken.push((i, column));
                }
            }
        }

        if taken.is_empty() {
            break;
        }

        if let Some(min_fill) = min_fill {
            if width_fill / truck_width < min_fill {
                for (i, column) in taken.into_iter().rev() {
                    pools[i].untake(column);
                }
                break;
            }
        }

        let mut wall = Wall::new(reliability);
        for (_, column) in taken {
            wall.push_column(column);
        }
        walls.push(wall);
    }
    walls
}

/// Merges weak walls (below the minimum fill): first within a department,
/// then across departments. Appended columns are re-anchored at the
/// absorber's pre-merge right edge.
pub fn merge_weak_walls(
    walls: &mut Vec<Wall>,
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) {
    let mut merges = 0;
    for same_dept_only in [true, false] {
        let mut i = 0;
        while i < walls.len() {
            let mut j = i + 1;
            while j < walls.len() {
                let weak_i = walls[i].fill_ratio(truck_width) < config.min_fill;
                if !weak_i {
                    break;
                }
                let weak_j = walls[j].fill_ratio(truck_width) < config.min_fill;
                let dept_ok = !same_dept_only || walls[i].majority_dept() == walls[j].majority_dept();
                // The combined wall must still present a strappable face.
                let depth_ok = walls[i].depth().max(walls[j].depth())
                    - walls[i].min_depth().min(walls[j].min_depth())
                    <= config.depth_relaxed;
                let width_ok = walls[i].width_fill() + walls[j].width_fill()
                    <= truck_width + wallplan_core::WP_WIDTH_SLACK;

                if weak_j && dept_ok && depth_ok && width_ok {
                    let absorbed = walls.remove(j);
                    let target = &mut walls[i];
                    target.demote(absorbed.reliability);
                    for column in absorbed.columns {
                        target.push_column(column);
                    }
                    if !target.single_dept() {
                        target.demote(Reliability::OrphanMixed);
                    }
                    merges += 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }
    if merges > 0 {
        diag.note("orphans", format!("merged {} weak wall(s)", merges));
    }
}
