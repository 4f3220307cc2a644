//! Phase 3C: weak-wall absorption. Phase 3D: column-level rebuild.
//!
//! After the orphan passes, very weak walls are dissolved into stronger
//! neighbours column by column, and whatever is still fragmented is torn
//! down to columns and rebuilt with a weighted best-fit.

use crate::inventory::InventoryGroup;
use crate::wall::{Column, Reliability, Wall};
use wallplan_core::{Config, Diagnostics, TruckEnvelope, DEFAULT_TRUCK_HEIGHT, WP_WIDTH_SLACK};

/// Weight of the fill gain in the rebuild score.
const REBUILD_W_FILL: f64 = 0.60;
/// Weight of depth homogeneity.
const REBUILD_W_DEPTH: f64 = 0.25;
/// Weight of height evenness.
const REBUILD_W_HEIGHT: f64 = 0.10;
/// Weight of department cohesion.
const REBUILD_W_DEPT: f64 = 0.05;

/// Phase 3C: dissolves orphan walls below the absorb threshold.
///
/// Each column of a dissolving wall moves to the first wall that is
/// either a full-family wall or a strong-enough orphan wall, is depth
/// compatible, and has room. The absorber is demoted to
/// [`Reliability::OrphanMixed`]. Columns with no taker stay behind.
pub fn absorb_weak_walls(
    walls: &mut Vec<Wall>,
    truck_width: f64,
    config: &Config,
    diag: &mut Diagnostics,
) {
    let mut moved = 0;
    for i in 0..walls.len() {
        let dissolving = !walls[i].is_floor
            && walls[i].reliability >= Reliability::OrphanSameDept
            && walls[i].fill_ratio(truck_width) < config.absorb_threshold;
        if !dissolving {
            continue;
        }

        let columns = std::mem::take(&mut walls[i].columns);
        let mut kept: Vec<Column> = Vec::new();

        for column in columns {
            let target = walls.iter().position(|w| {
                !w.is_floor
                    && !w.columns.is_empty()
                    && (w.reliability <= Reliability::TightFit
                        || w.fill_ratio(truck_width) >= config.absorb_threshold)
                    && w.depth().max(column.depth) - w.min_depth().min(column.depth)
                        <= config.depth_relaxed
                    && w.width_fill() + column.width <= truck_width + WP_WIDTH_SLACK
            });
            match target {
                Some(t) => {
                    walls[t].push_column(column);
                    walls[t].demote(Reliability::OrphanMixed);
                    moved += 1;
                }
                None => kept.push(column),
            }
        }

        // Re-anchor whatever stayed behind.
        for column in kept {
            walls[i].push_column(column);
        }
    }

    walls.retain(|w| !w.columns.is_empty());
    if moved > 0 {
        diag.note("consolidate", format!("absorbed {} column(s) from weak walls", moved));
    }
}

/// Phase 3D: rebuilds the remaining weak orphan walls at column level.
///
/// Triggered when at least two orphan walls sit below the minimum fill.
/// Their columns (plus any residual pool cases) are sorted widest first
/// and re-accreted around anchors with a weighted best-fit score.
pub fn rebuild_weak_walls(
    walls: &mut Vec<Wall>,
    pools: &mut [InventoryGroup],
    envelope: &TruckEnvelope,
    config: &Config,
    diag: &mut Diagnostics,
) {
    let weak: Vec<usize> = walls
        .iter()
        .enumerate()
        .filter(|(_, w)| {
            !w.is_floor
                && w.reliability >= Reliability::OrphanSameDept
                && w.fill_ratio(envelope.width) < config.min_fill
        })
        .map(|(i, _)| i)
        .collect();
    if weak.len() < 2 {
        return;
    }

    // Tear the weak walls down to a flat column list.
    let mut columns: Vec<Column> = Vec::new();
    for &i in weak.iter().rev() {
        let wall = walls.remove(i);
        let mut cols = wall.columns;
        cols.append(&mut columns);
        columns = cols;
    }

    // Residual pool cases join as fresh columns.
    for pool in pools.iter_mut().filter(|p| !p.is_floor) {
        while let Some(column) = pool.take_column(None) {
            columns.push(column);
        }
    }

    columns.sort_by(|a, b| {
        b.width
            .partial_cmp(&a.width)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let torn_down = weak.len();
    let mut rebuilt = 0;
    while !columns.is_empty() {
        let anchor = columns.remove(0);
        let mut wall = Wall::new(Reliability::OrphanSameDept);
        wall.push_column(anchor);

        loop {
            let next = best_fit(&wall, &columns, envelope, config);
            match next {
                Some(i) => {
                    let column = columns.remove(i);
                    wall.push_column(column);
                }
                None => break,
            }
        }

        wall.reliability = if wall.single_group() || wall.single_dept() {
            Reliability::OrphanSameDept
        } else {
            Reliability::OrphanMixed
        };
        rebuilt += 1;
        walls.push(wall);
    }

    diag.note(
        "consolidate",
        format!("rebuilt {} weak wall(s) into {} wall(s)", torn_down, rebuilt),
    );
}

/// Picks the column maximizing the weighted rebuild score, or None when
/// nothing fits the wall's width and depth window.
fn best_fit(
    wall: &Wall,
    columns: &[Column],
    envelope: &TruckEnvelope,
    config: &Config,
) -> Option<usize> {
    let truck_height = if envelope.enforces_height() {
        envelope.height
    } else {
        DEFAULT_TRUCK_HEIGHT
    };
    let width_fill = wall.width_fill();
    let majority = wall.majority_dept();

    let mut best: Option<(usize, f64)> = None;
    for (i, column) in columns.iter().enumerate() {
        if width_fill + column.width > envelope.width {
            continue;
        }
        let new_range =
            wall.depth().max(column.depth) - wall.min_depth().min(column.depth);
        if new_range > config.depth_relaxed {
            continue;
        }

        let fill_term = (width_fill + column.width) / envelope.width;
        let depth_term = 1.0 - new_range / config.depth_relaxed;
        let height_term =
            1.0 - (wall.max_height() - column.stacked_height()).abs() / truck_height;
        let dept_term = if column.dept == majority { 1.0 } else { 0.0 };

        let score = REBUILD_W_FILL * fill_term
            + REBUILD_W_DEPTH * depth_term
            + REBUILD_W_HEIGHT * height_term
            + REBUILD_W_DEPT * dept_term;

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(group: &str, dept: &str, w: f64, d: f64, h: f64, k: usize) -> Column {
        Column {
            group: group.into(),
            dept: dept.into(),
            width: w,
            depth: d,
            height: h,
            rotation: 0.0,
            cases: (0..k)
                .map(|i| wallplan_core::Case::new(format!("{}-{}", group, i), w, d, h))
                .collect(),
            x_off: 0.0,
        }
    }

    fn wall_of(reliability: Reliability, columns: Vec<Column>) -> Wall {
        let mut wall = Wall::new(reliability);
        for c in columns {
            wall.push_column(c);
        }
        wall
    }

    #[test]
    fn test_absorb_moves_column_into_full_wall() {
        let mut walls = vec![
            wall_of(
                Reliability::FullWall,
                vec![
                    column("A", "LX", 30.0, 30.0, 40.0, 1),
                    column("A", "LX", 30.0, 30.0, 40.0, 1),
                ],
            ),
            wall_of(
                Reliability::OrphanSameDept,
                vec![column("B", "LX", 20.0, 28.0, 30.0, 1)],
            ),
        ];

        absorb_weak_walls(
            &mut walls,
            98.0,
            &Config::default(),
            &mut Diagnostics::new(),
        );

        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].columns.len(), 3);
        assert_eq!(walls[0].columns[2].x_off, 60.0);
        assert_eq!(walls[0].reliability, Reliability::OrphanMixed);
    }

    #[test]
    fn test_absorb_skips_depth_incompatible_target() {
        let mut walls = vec![
            wall_of(
                Reliability::FullWall,
                vec![
                    column("A", "LX", 30.0, 30.0, 40.0, 1),
                    column("A", "LX", 30.0, 30.0, 40.0, 1),
                ],
            ),
            wall_of(
                Reliability::OrphanSameDept,
                vec![column("B", "LX", 20.0, 48.0, 30.0, 1)],
            ),
        ];

        absorb_weak_walls(
            &mut walls,
            98.0,
            &Config::default(),
            &mut Diagnostics::new(),
        );

        // |48 - 30| = 18 > 8: column stays in its own wall.
        assert_eq!(walls.len(), 2);
        assert_eq!(walls[0].reliability, Reliability::FullWall);
    }

    #[test]
    fn test_rebuild_needs_two_weak_walls() {
        let mut walls = vec![wall_of(
            Reliability::OrphanMixed,
            vec![column("A", "LX", 30.0, 30.0, 40.0, 1)],
        )];
        let mut pools: Vec<InventoryGroup> = Vec::new();

        rebuild_weak_walls(
            &mut walls,
            &mut pools,
            &TruckEnvelope::default(),
            &Config::default(),
            &mut Diagnostics::new(),
        );

        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].columns.len(), 1);
    }

    #[test]
    fn test_rebuild_accretes_compatible_columns() {
        // Three one-column walls, depths 30/28/26: rebuild packs them
        // around the widest anchor into a single wall.
        let mut walls = vec![
            wall_of(
                Reliability::OrphanMixed,
                vec![column("A", "LX", 36.0, 30.0, 40.0, 1)],
            ),
            wall_of(
                Reliability::OrphanMixed,
                vec![column("B", "LX", 30.0, 28.0, 38.0, 1)],
            ),
            wall_of(
                Reliability::OrphanMixed,
                vec![column("C", "SON", 24.0, 26.0, 36.0, 1)],
            ),
        ];
        let mut pools: Vec<InventoryGroup> = Vec::new();

        rebuild_weak_walls(
            &mut walls,
            &mut pools,
            &TruckEnvelope::default(),
            &Config::default(),
            &mut Diagnostics::new(),
        );

        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].columns.len(), 3);
        // Anchor is the widest column.
        assert_eq!(walls[0].columns[0].group, "A");
        // Two departments in the rebuilt wall.
        assert_eq!(walls[0].reliability, Reliability::OrphanMixed);
    }

    #[test]
    fn test_rebuild_respects_depth_window() {
        let mut walls = vec![
            wall_of(
                Reliability::OrphanMixed,
                vec![column("A", "LX", 36.0, 30.0, 40.0, 1)],
            ),
            wall_of(
                Reliability::OrphanMixed,
                vec![column("B", "LX", 30.0, 60.0, 38.0, 1)],
            ),
        ];
        let mut pools: Vec<InventoryGroup> = Vec::new();

        rebuild_weak_walls(
            &mut walls,
            &mut pools,
            &TruckEnvelope::default(),
            &Config::default(),
            &mut Diagnostics::new(),
        );

        // |60 - 30| > 8: two separate rebuilt walls.
        assert_eq!(walls.len(), 2);
        assert!(walls
            .iter()
            .all(|w| w.reliability == Reliability::OrphanSameDept));
    }
}
