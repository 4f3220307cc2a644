//! Phase 5: coordinate emission. Phase 5B: spillover recovery.
//!
//! Walks the ordered wall sequence with a y cursor from the cab,
//! assigning wall identifiers and exact placements. Columns that overrun
//! the truck width are queued as spillover and recovered into dedicated
//! stage -1 walls after all regular stages.

use crate::ordering::StagedWall;
use crate::wall::{Column, Reliability, Wall};
use wallplan_core::{Case, Diagnostics, Placement, TruckEnvelope, WallSection, WP_WIDTH_SLACK};

/// Label given to spillover-recovery walls.
const SPILLOVER_LABEL: &str = "Spillover";

/// One slot in the emission sequence.
#[derive(Debug, Clone)]
pub enum EmitSlot {
    /// A load bar consuming depth but emitting nothing.
    LoadBar(f64),
    /// A staged wall.
    Wall(StagedWall),
}

/// A case queued for spillover recovery, with its placed orientation.
#[derive(Debug, Clone)]
struct SpillItem {
    case: Case,
    group: String,
    dept: String,
    width: f64,
    depth: f64,
    height: f64,
    rotation: f64,
}

/// Emits coordinates for the full slot sequence, then recovers
/// spillovers into trailing stage -1 walls.
pub fn emit(
    slots: Vec<EmitSlot>,
    envelope: &TruckEnvelope,
    diag: &mut Diagnostics,
) -> (Vec<Placement>, Vec<WallSection>) {
    let mut placements = Vec::new();
    let mut sections = Vec::new();
    let mut spills: Vec<SpillItem> = Vec::new();
    let mut y_pos = 0.0;
    let mut wall_index = 0usize;

    for slot in slots {
        match slot {
            EmitSlot::LoadBar(depth) => {
                diag.note("emit", format!("load bar at y={:.1}..{:.1}", y_pos, y_pos + depth));
                y_pos += depth;
            }
            EmitSlot::Wall(staged) => {
                let section = emit_wall(
                    &staged,
                    &mut y_pos,
                    &mut wall_index,
                    envelope,
                    true,
                    &mut spills,
                    &mut placements,
                    diag,
                );
                sections.push(section);
            }
        }
    }

    // Phase 5B: spilled cases come back as dedicated door-end walls.
    if !spills.is_empty() {
        diag.note(
            "spillover",
            format!("recovering {} spilled case(s)", spills.len()),
        );
        for wall in recovery_walls(std::mem::take(&mut spills), envelope.width) {
            let staged = StagedWall {
                wall,
                stage: -1,
                label: SPILLOVER_LABEL.to_string(),
            };
            let section = emit_wall(
                &staged,
                &mut y_pos,
                &mut wall_index,
                envelope,
                false,
                &mut spills,
                &mut placements,
                diag,
            );
            sections.push(section);
        }
    }

    (placements, sections)
}

/// Emits one wall at the cursor, advancing it by the wall's depth.
#[allow(clippy::too_many_arguments)]
fn emit_wall(
    staged: &StagedWall,
    y_pos: &mut f64,
    wall_index: &mut usize,
    envelope: &TruckEnvelope,
    allow_spill: bool,
    spills: &mut Vec<SpillItem>,
    placements: &mut Vec<Placement>,
    diag: &mut Diagnostics,
) -> WallSection {
    let wall = &staged.wall;
    let wall_id = format!("wp_{}", *wall_index);
    *wall_index += 1;

    let wall_depth = wall.depth();
    let y_start = *y_pos;
    let y_end = y_start + wall_depth;

    let mut cumul_x = 0.0;
    let mut emitted = Vec::new();
    for column in &wall.columns {
        if allow_spill && cumul_x + column.width > envelope.width + WP_WIDTH_SLACK {
            diag.warn(
                "emit",
                format!(
                    "column of '{}' overruns the truck width in {}; queued {} case(s) for recovery",
                    column.group,
                    wall_id,
                    column.count()
                ),
            );
            for case in &column.cases {
                spills.push(SpillItem {
                    case: case.clone(),
                    group: column.group.clone(),
                    dept: column.dept.clone(),
                    width: column.width,
                    depth: column.depth,
                    height: column.height,
                    rotation: column.rotation,
                });
            }
            continue;
        }

        for (tier, case) in column.cases.iter().enumerate() {
            let height = if case.height > 0.0 {
                case.height
            } else {
                column.height
            };
            emitted.push(Placement {
                name: case.name.clone(),
                case_id: case.id.clone(),
                group: column.group.clone(),
                dept: column.dept.clone(),
                x: cumul_x,
                y: y_start,
                z: tier as f64 * column.height,
                width: column.width,
                depth: column.depth,
                height,
                rotation: column.rotation,
                wall_id: wall_id.clone(),
                stage_index: staged.stage,
            });
        }
        cumul_x += column.width;
    }

    *y_pos = y_end;

    let fill_pct = if envelope.width > 0.0 {
        cumul_x / envelope.width * 100.0
    } else {
        0.0
    };
    let case_count = emitted.len();
    placements.extend(emitted.iter().cloned());

    WallSection {
        id: wall_id,
        label: staged.label.clone(),
        stage: staged.stage,
        y_start,
        y_end,
        wall_width: cumul_x,
        fill_pct,
        placements: emitted,
        case_count,
        depth: wall_depth,
    }
}

/// Builds recovery walls from spilled cases: bucketed by rounded depth,
/// packed widest first, one case per column.
fn recovery_walls(spills: Vec<SpillItem>, truck_width: f64) -> Vec<Wall> {
    // Depth buckets in first-occurrence order.
    let mut buckets: Vec<(i64, Vec<SpillItem>)> = Vec::new();
    for item in spills {
        let key = item.depth.round() as i64;
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(item),
            None => buckets.push((key, vec![item])),
        }
    }

    let mut walls = Vec::new();
    for (_, mut bucket) in buckets {
        bucket.sort_by(|a, b| {
            b.width
                .partial_cmp(&a.width)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut wall = Wall::new(Reliability::OrphanMixed);
        for item in bucket {
            if !wall.columns.is_empty() && wall.width_fill() + item.width > truck_width {
                walls.push(wall);
                wall = Wall::new(Reliability::OrphanMixed);
            }
            wall.push_column(Column {
                group: item.group,
                dept: item.dept,
                width: item.width,
                depth: item.depth,
                height: item.height,
                rotation: item.rotation,
                cases: vec![item.case],
                x_off: 0.0,
            });
        }
        if !wall.columns.is_empty() {
            walls.push(wall);
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(group: &str, w: f64, d: f64, h: f64, k: usize) -> Column {
        Column {
            group: group.into(),
            dept: "LX".into(),
            width: w,
            depth: d,
            height: h,
            rotation: 0.0,
            cases: (0..k)
                .map(|i| {
                    Case::new(format!("{}-{}", group, i), w, d, h).with_id(format!("{}{}", group, i))
                })
                .collect(),
            x_off: 0.0,
        }
    }

    fn staged(wall: Wall, stage: i32) -> StagedWall {
        StagedWall {
            wall,
            stage,
            label: "LX / Full Wall".into(),
        }
    }

    fn envelope() -> TruckEnvelope {
        TruckEnvelope::new(98.0, 240.0, 96.0)
    }

    #[test]
    fn test_emit_stacks_and_advances_cursor() {
        let mut wall = Wall::new(Reliability::FullWall);
        wall.push_column(column("A", 30.0, 30.0, 40.0, 2));
        wall.push_column(column("A", 30.0, 30.0, 40.0, 1));

        let slots = vec![EmitSlot::Wall(staged(wall, 0))];
        let (placements, sections) =
            emit(slots, &envelope(), &mut Diagnostics::new());

        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].z, 0.0);
        assert_eq!(placements[1].z, 40.0);
        assert_eq!(placements[2].x, 30.0);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, "wp_0");
        assert_eq!(sections[0].y_start, 0.0);
        assert_eq!(sections[0].y_end, 30.0);
        assert_eq!(sections[0].case_count, 3);
    }

    #[test]
    fn test_load_bar_consumes_depth_silently() {
        let mut wall = Wall::new(Reliability::FullWall);
        wall.push_column(column("A", 30.0, 30.0, 40.0, 1));

        let slots = vec![
            EmitSlot::LoadBar(2.0),
            EmitSlot::Wall(staged(wall, 0)),
        ];
        let (placements, sections) =
            emit(slots, &envelope(), &mut Diagnostics::new());

        assert_eq!(placements.len(), 1);
        assert_eq!(sections[0].y_start, 2.0);
        assert_eq!(sections[0].y_end, 32.0);
    }

    #[test]
    fn test_wall_ids_count_emitted_walls() {
        let mut w1 = Wall::new(Reliability::FullWall);
        w1.push_column(column("A", 30.0, 30.0, 40.0, 1));
        let mut w2 = Wall::new(Reliability::FullWall);
        w2.push_column(column("B", 30.0, 28.0, 40.0, 1));

        let slots = vec![EmitSlot::Wall(staged(w1, 0)), EmitSlot::Wall(staged(w2, 1))];
        let (_, sections) =
            emit(slots, &envelope(), &mut Diagnostics::new());

        assert_eq!(sections[0].id, "wp_0");
        assert_eq!(sections[1].id, "wp_1");
        assert_eq!(sections[1].y_start, 30.0);
    }

    #[test]
    fn test_spillover_recovered_at_stage_minus_one() {
        // 110-wide column in a 98-wide truck: spills, then comes back as
        // a trailing stage -1 wall, emitted without re-spilling.
        let mut wall = Wall::new(Reliability::FullWall);
        wall.push_column(column("BIG", 110.0, 40.0, 50.0, 1));

        let slots = vec![EmitSlot::Wall(staged(wall, 0))];
        let mut diag = Diagnostics::new();
        let (placements, sections) = emit(slots, &envelope(), &mut diag);

        assert_eq!(sections.len(), 2);
        // The owning wall emitted nothing but still consumed its depth.
        assert_eq!(sections[0].case_count, 0);
        assert_eq!(sections[0].y_end, 40.0);
        // The recovery wall trails with stage -1.
        assert_eq!(sections[1].stage, -1);
        assert_eq!(sections[1].label, "Spillover");
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].x, 0.0);
        assert_eq!(placements[0].y, 40.0);
        assert_eq!(placements[0].stage_index, -1);
    }

    #[test]
    fn test_spill_buckets_group_by_rounded_depth() {
        // Two spilled cases of similar depth share a recovery wall; a
        // third with a different depth gets its own.
        let mut wall = Wall::new(Reliability::FullWall);
        wall.push_column(column("A", 60.0, 30.0, 40.0, 1));
        wall.push_column(column("B", 50.0, 30.2, 40.0, 1));
        wall.push_column(column("C", 45.0, 70.0, 40.0, 1));

        let slots = vec![EmitSlot::Wall(staged(wall, 0))];
        let (placements, sections) =
            emit(slots, &envelope(), &mut Diagnostics::new());

        // A (60) emits; B (110 cumulative) and C spill.
        assert_eq!(sections[0].case_count, 1);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].stage, -1);
        assert_eq!(sections[2].stage, -1);
        assert_eq!(placements.len(), 3);
    }
}
