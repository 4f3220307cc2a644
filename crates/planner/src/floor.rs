//! Phase 1.5: floor-panel walls.
//!
//! Floor panels are substrate: they are laid at the cab before any case
//! wall, one full-width wall per row of panels, separated by load bars so
//! the next row can be slid in over the bar. Floor walls bypass every
//! later optimization phase.

use crate::inventory::InventoryGroup;
use crate::wall::{Reliability, Wall};
use wallplan_core::Diagnostics;

/// Builds one wall per row of floor panels, in group listing order.
///
/// The emitter inserts a load-bar gap between consecutive floor walls,
/// never after the last.
pub fn build_floor_walls(
    groups: &mut [InventoryGroup],
    truck_width: f64,
    diag: &mut Diagnostics,
) -> Vec<Wall> {
    let mut walls = Vec::new();

    for group in groups.iter_mut().filter(|g| g.is_floor) {
        group.refresh_geometry(truck_width);
        let per_row = group.per_row.max(1);

        let mut rows = 0;
        while !group.cases.is_empty() {
            let mut wall = Wall::new(Reliability::FullWall);
            wall.is_floor = true;
            for _ in 0..per_row {
                // Floor panels never stack.
                match group.take_column(Some(1)) {
                    Some(column) => wall.push_column(column),
                    None => break,
                }
            }
            rows += 1;
            walls.push(wall);
        }

        if rows > 0 {
            diag.note(
                "floor",
                format!("'{}' laid as {} floor wall(s), {} per row", group.name, rows, per_row),
            );
        }
    }

    walls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::split_groups;
    use wallplan_core::Case;

    #[test]
    fn test_floor_rows_chunked_by_per_row() {
        let cases = vec![Case::new("panel", 45.0, 100.0, 60.0).floor_panel(); 4];
        let mut groups = split_groups(cases, &mut Diagnostics::new());
        let walls = build_floor_walls(&mut groups, 98.0, &mut Diagnostics::new());

        assert_eq!(walls.len(), 2);
        for wall in &walls {
            assert!(wall.is_floor);
            assert_eq!(wall.reliability, Reliability::FullWall);
            assert!(wall.flat_top());
            assert_eq!(wall.columns.len(), 2);
            assert_eq!(wall.width_fill(), 90.0);
            assert_eq!(wall.depth(), 100.0);
        }
        assert!(groups[0].cases.is_empty());
    }

    #[test]
    fn test_floor_panels_never_stack() {
        let cases = vec![
            Case::new("panel", 45.0, 100.0, 60.0)
                .floor_panel()
                .with_max_stack(4);
            2
        ];
        let mut groups = split_groups(cases, &mut Diagnostics::new());
        let walls = build_floor_walls(&mut groups, 98.0, &mut Diagnostics::new());

        assert_eq!(walls.len(), 1);
        assert_eq!(walls[0].columns.len(), 2);
        assert!(walls[0].columns.iter().all(|c| c.count() == 1));
    }

    #[test]
    fn test_non_floor_groups_untouched() {
        let cases = vec![Case::new("case", 30.0, 24.0, 40.0); 3];
        let mut groups = split_groups(cases, &mut Diagnostics::new());
        let walls = build_floor_walls(&mut groups, 98.0, &mut Diagnostics::new());

        assert!(walls.is_empty());
        assert_eq!(groups[0].cases.len(), 3);
    }
}
