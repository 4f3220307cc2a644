//! Phase 4: wall scoring and stage ordering.
//!
//! Walls that form the back of the load must be tall, full,
//! departmentally coherent, flat-topped and multi-column: flat-topped so
//! the next wall has a stable counterface, multi-column to resist
//! lateral collapse under braking. The score encodes exactly that; its
//! coefficients are part of the observable contract.

use crate::wall::Wall;
use wallplan_core::{Config, TruckEnvelope, DEFAULT_TRUCK_HEIGHT};

/// Height spread above which a wall is penalized as untidy, inches.
const RAGGED_TOP_TOL: f64 = 10.0;

/// A wall with its assigned stage and label.
#[derive(Debug, Clone)]
pub struct StagedWall {
    /// The wall.
    pub wall: Wall,
    /// Stage index (-1 for spillover walls).
    pub stage: i32,
    /// Stage label.
    pub label: String,
}

/// Computes a wall's placement score. Lower ranks first, toward the cab.
pub fn wall_score(wall: &Wall, envelope: &TruckEnvelope, config: &Config) -> i64 {
    let truck_height = if envelope.enforces_height() {
        envelope.height
    } else {
        DEFAULT_TRUCK_HEIGHT
    };

    let fill_ratio = wall.fill_ratio(envelope.width).min(1.0);
    let effective_h = wall.max_height() * fill_ratio;
    let height_inv = (100.0 - effective_h).round() as i64;
    let dept_pri = config.dept_priority.priority_or_last(&wall.majority_dept()) as i64;
    let rel_group = wall.reliability.rank().min(4) as i64;

    let mut score = height_inv * 100 + dept_pri * 4 + rel_group;

    let height_range = wall.height_range();
    if height_range > RAGGED_TOP_TOL {
        score += ((height_range / truck_height) * 3000.0).round() as i64;
    }

    score -= (wall.columns.len().min(4) as i64) * 50;

    if wall.columns.len() <= 2 && fill_ratio < 0.90 {
        score += 2000;
    }
    if fill_ratio < 0.50 {
        score += 5000;
    }

    score
}

/// Orders walls cab-to-door by score; ties break on department priority,
/// then on descending fill.
pub fn order_walls(mut walls: Vec<Wall>, envelope: &TruckEnvelope, config: &Config) -> Vec<Wall> {
    let mut keyed: Vec<(i64, i64, f64, Wall)> = walls
        .drain(..)
        .map(|w| {
            let score = wall_score(&w, envelope, config);
            let dept_pri = config.dept_priority.priority_or_last(&w.majority_dept()) as i64;
            let fill = w.fill_ratio(envelope.width);
            (score, dept_pri, fill, w)
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
    });

    keyed.into_iter().map(|(_, _, _, w)| w).collect()
}

/// Groups ordered walls into stages: a run of consecutive walls sharing
/// reliability and majority department, with max heights within the
/// stage tolerance of the stage's first wall.
pub fn stage_walls(ordered: Vec<Wall>, config: &Config, first_stage: i32) -> Vec<StagedWall> {
    let mut staged: Vec<StagedWall> = Vec::new();
    let mut stage = first_stage - 1;
    let mut head: Option<(crate::wall::Reliability, String, f64)> = None;

    for wall in ordered {
        let dept = wall.majority_dept();
        let opens_new = match &head {
            None => true,
            Some((rel, head_dept, head_height)) => {
                *rel != wall.reliability
                    || *head_dept != dept
                    || (wall.max_height() - head_height).abs() > config.stage_height_tol
            }
        };
        if opens_new {
            stage += 1;
            head = Some((wall.reliability, dept.clone(), wall.max_height()));
        }
        let label = format!("{} / {}", dept, wall.reliability.label());
        staged.push(StagedWall { wall, stage, label });
    }
    staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::{Column, Reliability};
    use wallplan_core::Case;

    fn column(dept: &str, w: f64, d: f64, h: f64, k: usize) -> Column {
        Column {
            group: "G".into(),
            dept: dept.into(),
            width: w,
            depth: d,
            height: h,
            rotation: 0.0,
            cases: (0..k)
                .map(|i| Case::new(format!("c{}", i), w, d, h))
                .collect(),
            x_off: 0.0,
        }
    }

    fn wall(dept: &str, reliability: Reliability, cols: usize, w: f64, h: f64) -> Wall {
        let mut wall = Wall::new(reliability);
        for _ in 0..cols {
            wall.push_column(column(dept, w, 30.0, h, 1));
        }
        wall
    }

    #[test]
    fn test_tall_full_wall_scores_lower() {
        let envelope = TruckEnvelope::default();
        let config = Config::default();

        let tall = wall("LX", Reliability::FullWall, 3, 30.0, 80.0);
        let short = wall("LX", Reliability::FullWall, 3, 30.0, 40.0);

        assert!(wall_score(&tall, &envelope, &config) < wall_score(&short, &envelope, &config));
    }

    #[test]
    fn test_score_formula_literal_values() {
        let envelope = TruckEnvelope::default();
        let config = Config::default();

        // 3 columns of 30x80, fill 90/98, flat top.
        let w = wall("LX", Reliability::FullWall, 3, 30.0, 80.0);
        let fill: f64 = 90.0 / 98.0;
        let height_inv = (100.0 - 80.0 * fill).round() as i64;
        let expected = height_inv * 100 + 4 + 1 - 150;
        assert_eq!(wall_score(&w, &envelope, &config), expected);
    }

    #[test]
    fn test_sparse_wall_penalties() {
        let envelope = TruckEnvelope::default();
        let config = Config::default();

        // Two columns, 60/98 fill: height term 76, dept 1, tier clamp 4,
        // two column credits, narrow-and-sparse penalty.
        let two_col = wall("LX", Reliability::OrphanMixed, 2, 30.0, 40.0);
        assert_eq!(
            wall_score(&two_col, &envelope, &config),
            7600 + 4 + 4 - 100 + 2000
        );

        // Three columns, 90/98 fill: no sparse penalty.
        let base = wall("LX", Reliability::OrphanMixed, 3, 30.0, 40.0);
        assert_eq!(wall_score(&base, &envelope, &config), 6300 + 4 + 4 - 150);

        // One column, 30/98 fill: sparse and sub-50% penalties stack.
        let one_col = wall("LX", Reliability::OrphanMixed, 1, 30.0, 40.0);
        assert_eq!(
            wall_score(&one_col, &envelope, &config),
            8800 + 4 + 4 - 50 + 2000 + 5000
        );
    }

    #[test]
    fn test_ragged_top_penalty() {
        let envelope = TruckEnvelope::default();
        let config = Config::default();

        let mut ragged = Wall::new(Reliability::FullWall);
        ragged.push_column(column("LX", 30.0, 30.0, 80.0, 1));
        ragged.push_column(column("LX", 30.0, 30.0, 40.0, 1));
        ragged.push_column(column("LX", 30.0, 30.0, 80.0, 1));

        let flat = wall("LX", Reliability::FullWall, 3, 30.0, 80.0);
        let penalty = ((40.0 / 110.0) * 3000.0_f64).round() as i64;

        // Same max height and fill; only the ragged-top term differs.
        let s_ragged = wall_score(&ragged, &envelope, &config);
        let s_flat = wall_score(&flat, &envelope, &config);
        assert_eq!(s_ragged - s_flat, penalty);
    }

    #[test]
    fn test_order_ties_break_on_dept_priority() {
        let envelope = TruckEnvelope::default();
        let config = Config::default();

        let son = wall("SON", Reliability::FullWall, 3, 30.0, 80.0);
        let lx = wall("LX", Reliability::FullWall, 3, 30.0, 80.0);

        let ordered = order_walls(vec![son, lx], &envelope, &config);
        assert_eq!(ordered[0].majority_dept(), "LX");
        assert_eq!(ordered[1].majority_dept(), "SON");
    }

    #[test]
    fn test_stage_grouping_by_height_band() {
        let config = Config::default();
        let walls = vec![
            wall("LX", Reliability::FullWall, 3, 30.0, 80.0),
            wall("LX", Reliability::FullWall, 3, 30.0, 70.0),
            wall("LX", Reliability::FullWall, 3, 30.0, 60.0),
            wall("SON", Reliability::FullWall, 3, 30.0, 60.0),
        ];

        let staged = stage_walls(walls, &config, 0);
        // 80 and 70 share a stage; 60 is beyond the 15" band of 80;
        // the SON wall breaks on department.
        assert_eq!(staged[0].stage, 0);
        assert_eq!(staged[1].stage, 0);
        assert_eq!(staged[2].stage, 1);
        assert_eq!(staged[3].stage, 2);
        assert_eq!(staged[3].label, "SON / Full Wall");
    }
}
