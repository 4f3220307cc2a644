//! The wall planner orchestrator.

use crate::consolidate::{absorb_weak_walls, rebuild_weak_walls};
use crate::emit::{emit, EmitSlot};
use crate::floor::build_floor_walls;
use crate::full_wall::{build_full_walls, gap_fill};
use crate::inventory::{resolve_inventory, split_groups};
use crate::ordering::{order_walls, stage_walls, StagedWall};
use crate::orphan::{apply_kb_patterns, rescue_orphans};
use crate::validate::validate;
use wallplan_core::{Case, Config, Diagnostics, Error, Result, SolvePlan, TruckEnvelope};

/// Label given to floor-panel walls.
const FLOOR_LABEL: &str = "Floor";

/// Deterministic wall-by-wall load planner.
///
/// The planner is a pure synchronous function of its inputs: two solves
/// over identical cases and envelope produce byte-identical output,
/// including wall identifiers and placement order.
///
/// # Example
///
/// ```
/// use wallplan_core::{Case, Config, TruckEnvelope};
/// use wallplan_planner::WallPlanner;
///
/// let cases = vec![Case::new("Amp Rack", 30.0, 30.0, 40.0); 6];
/// let envelope = TruckEnvelope::new(98.0, 240.0, 96.0);
///
/// let planner = WallPlanner::new(Config::default());
/// let plan = planner.solve(&cases, &envelope).unwrap();
/// assert_eq!(plan.case_count(), 6);
/// ```
pub struct WallPlanner {
    config: Config,
}

impl WallPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates a planner with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plans the load: transforms an unordered case inventory into an
    /// ordered sequence of wall sections with exact placements.
    ///
    /// Cases with non-positive dimensions are skipped with a diagnostic.
    /// A load deeper than the envelope is emitted in full; the caller
    /// observes the overflow through [`SolvePlan::total_depth`].
    pub fn solve(&self, cases: &[Case], envelope: &TruckEnvelope) -> Result<SolvePlan> {
        envelope.validate()?;
        log::debug!(
            "planning {} case(s) in a {}x{}x{} hold",
            cases.len(),
            envelope.width,
            envelope.length,
            envelope.height
        );

        let mut diag = Diagnostics::new();
        if cases.is_empty() {
            diag.note("input", "no cases; nothing to plan");
            return Ok(SolvePlan {
                diagnostics: diag,
                ..SolvePlan::default()
            });
        }

        let mut config = self.config.clone();
        let ingested = self.ingest(cases, &mut config, &mut diag);
        if ingested.is_empty() {
            diag.note("input", "all cases were skipped");
            return Ok(SolvePlan {
                diagnostics: diag,
                ..SolvePlan::default()
            });
        }

        // Phases 0 and 1: inventory.
        let mut groups = split_groups(ingested, &mut diag);
        resolve_inventory(&mut groups, envelope.width, &mut diag);
        diag.note("inventory", format!("{} inventory group(s)", groups.len()));

        // Phase 1.5: floor panels.
        let floor_walls = build_floor_walls(&mut groups, envelope.width, &mut diag);

        // Phases 2 and 2.5: full walls, then gap fill.
        let mut walls = build_full_walls(&mut groups, envelope.width, &config, &mut diag);
        gap_fill(&mut walls, &mut groups, envelope.width, &config, &mut diag);

        // Phase 3A: reserved recipe hook.
        walls.extend(apply_kb_patterns(&config.kb_patterns, &mut diag));

        // Phase 3B: orphan rescue.
        walls.extend(rescue_orphans(&mut groups, envelope.width, &config, &mut diag));

        // Phases 3C and 3D: consolidation.
        absorb_weak_walls(&mut walls, envelope.width, &config, &mut diag);
        rebuild_weak_walls(&mut walls, &mut groups, envelope, &config, &mut diag);

        if let Some(group) = groups
            .iter()
            .find(|g| !g.is_floor && !g.cases.is_empty())
        {
            return Err(Error::Internal(format!(
                "{} case(s) of '{}' left unplanned after consolidation",
                group.cases.len(),
                group.name
            )));
        }

        // Phase 4: score and stage, cab to door.
        let ordered = order_walls(walls, envelope, &config);
        let first_stage = if floor_walls.is_empty() { 0 } else { 1 };
        let staged = stage_walls(ordered, &config, first_stage);
        diag.note(
            "order",
            format!(
                "{} wall(s) staged after {} floor wall(s)",
                staged.len(),
                floor_walls.len()
            ),
        );

        // Phase 5: emission, floor first with load bars between rows.
        let mut slots = Vec::new();
        for (i, wall) in floor_walls.into_iter().enumerate() {
            if i > 0 {
                slots.push(EmitSlot::LoadBar(config.load_bar_gap));
            }
            slots.push(EmitSlot::Wall(StagedWall {
                wall,
                stage: 0,
                label: FLOOR_LABEL.to_string(),
            }));
        }
        slots.extend(staged.into_iter().map(EmitSlot::Wall));

        let (placements, sections) = emit(slots, envelope, &mut diag);

        validate(&placements, &sections, envelope, &config, &mut diag);

        Ok(SolvePlan {
            placements,
            sections,
            diagnostics: diag,
        })
    }

    /// Assigns identifiers, applies preset rotations, skips invalid
    /// cases and derives the department priority table.
    fn ingest(&self, cases: &[Case], config: &mut Config, diag: &mut Diagnostics) -> Vec<Case> {
        let mut ingested = Vec::with_capacity(cases.len());
        for (i, case) in cases.iter().enumerate() {
            let mut case = case.clone();
            if case.id.is_empty() {
                case.id = format!("c{}", i);
            }
            if case.rotation == 90.0 {
                std::mem::swap(&mut case.width, &mut case.depth);
            }
            if let Err(err) = case.validate() {
                diag.skip_case("input", &case.id, err.to_string());
                continue;
            }
            config.dept_priority.observe(&case.dept);
            ingested.push(case);
        }
        diag.note(
            "input",
            format!(
                "{} case(s) ingested, {} skipped",
                ingested.len(),
                diag.skipped_cases.len()
            ),
        );
        ingested
    }
}

impl Default for WallPlanner {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_envelope_is_fatal() {
        let planner = WallPlanner::default_config();
        let result = planner.solve(&[], &TruckEnvelope::new(0.0, 240.0, 96.0));
        assert!(matches!(result, Err(Error::InvalidEnvelope(_))));
    }

    #[test]
    fn test_invalid_case_is_skipped() {
        let cases = vec![
            Case::new("ok", 30.0, 30.0, 40.0),
            Case::new("bad", -1.0, 30.0, 40.0),
            Case::new("ok2", 30.0, 30.0, 40.0),
            Case::new("ok3", 30.0, 30.0, 40.0),
        ];
        let planner = WallPlanner::default_config();
        let plan = planner
            .solve(&cases, &TruckEnvelope::new(98.0, 240.0, 96.0))
            .unwrap();

        assert_eq!(plan.case_count(), 3);
        assert_eq!(plan.diagnostics.skipped_cases, vec!["c1".to_string()]);
    }

    #[test]
    fn test_preset_rotation_swaps_dims() {
        let cases = vec![Case::new("turned", 20.0, 50.0, 40.0).with_rotation(90.0); 4];
        let planner = WallPlanner::default_config();
        let plan = planner
            .solve(&cases, &TruckEnvelope::new(98.0, 240.0, 96.0))
            .unwrap();

        // The preset swap runs before grouping; the inventory oracle may
        // swap again, but every case must place either way.
        assert_eq!(plan.case_count(), 4);
    }

    #[test]
    fn test_solve_does_not_mutate_inputs() {
        let cases = vec![Case::new("a", 30.0, 30.0, 40.0); 3];
        let before = cases.clone();
        let envelope = TruckEnvelope::new(98.0, 240.0, 96.0);

        let planner = WallPlanner::default_config();
        planner.solve(&cases, &envelope).unwrap();
        assert_eq!(cases, before);
    }
}
