//! Post-placement validation.
//!
//! Runs unconditionally after emission and reports, but never alters,
//! the placements. Validation is observational by design: checking
//! during placement would create feedback loops between phases.

use nalgebra::{Point3, Vector3};
use wallplan_core::{
    Config, Diagnostics, FlatFaceGrade, Placement, TruckEnvelope, Violation, ViolationKind,
    WallSection,
};

/// Tolerance applied to every bounds and overlap check, inches.
const CHECK_TOL: f64 = 0.5;

/// An axis-aligned placed box used for the geometric checks.
#[derive(Debug, Clone, Copy)]
struct PlacedBox {
    min: Point3<f64>,
    size: Vector3<f64>,
}

impl PlacedBox {
    fn from_placement(p: &Placement) -> Self {
        Self {
            min: Point3::new(p.x, p.y, p.z),
            size: Vector3::new(p.width, p.depth, p.height),
        }
    }

    fn max(&self) -> Point3<f64> {
        self.min + self.size
    }

    /// Per-axis intersection extent against another box.
    fn penetration(&self, other: &PlacedBox) -> Vector3<f64> {
        let a_max = self.max();
        let b_max = other.max();
        Vector3::new(
            a_max.x.min(b_max.x) - self.min.x.max(other.min.x),
            a_max.y.min(b_max.y) - self.min.y.max(other.min.y),
            a_max.z.min(b_max.z) - self.min.z.max(other.min.z),
        )
    }
}

/// Checks bounds, pairwise overlap and per-wall flat-face quality.
pub fn validate(
    placements: &[Placement],
    sections: &[WallSection],
    envelope: &TruckEnvelope,
    config: &Config,
    diag: &mut Diagnostics,
) {
    check_bounds(placements, envelope, diag);
    check_overlaps(placements, diag);
    check_flat_faces(sections, config, diag);

    if diag.is_clean() {
        diag.note("validate", "no violations");
    } else {
        diag.note(
            "validate",
            format!("{} violation(s) reported", diag.violations.len()),
        );
    }
}

fn check_bounds(placements: &[Placement], envelope: &TruckEnvelope, diag: &mut Diagnostics) {
    for p in placements {
        let b = PlacedBox::from_placement(p);
        let max = b.max();
        let mut faults: Vec<String> = Vec::new();

        if b.min.x < -CHECK_TOL {
            faults.push(format!("x={:.1}", b.min.x));
        }
        if max.x > envelope.width + CHECK_TOL {
            faults.push(format!("x+w={:.1} exceeds width {:.1}", max.x, envelope.width));
        }
        if b.min.y < -CHECK_TOL {
            faults.push(format!("y={:.1}", b.min.y));
        }
        if b.min.z < -CHECK_TOL {
            faults.push(format!("z={:.1}", b.min.z));
        }
        if envelope.enforces_height() && max.z > envelope.height + CHECK_TOL {
            faults.push(format!(
                "z+h={:.1} exceeds height {:.1}",
                max.z, envelope.height
            ));
        }

        if !faults.is_empty() {
            diag.violation(
                Violation::new(
                    ViolationKind::Bounds,
                    format!("'{}' out of bounds: {}", p.name, faults.join(", ")),
                )
                .in_wall(p.wall_id.clone())
                .for_case(p.case_id.clone()),
            );
        }
    }
}

fn check_overlaps(placements: &[Placement], diag: &mut Diagnostics) {
    for i in 0..placements.len() {
        for j in (i + 1)..placements.len() {
            let a = PlacedBox::from_placement(&placements[i]);
            let b = PlacedBox::from_placement(&placements[j]);
            let pen = a.penetration(&b);
            if pen.x > CHECK_TOL && pen.y > CHECK_TOL && pen.z > CHECK_TOL {
                diag.violation(
                    Violation::new(
                        ViolationKind::Overlap,
                        format!(
                            "'{}' and '{}' overlap by {:.1} x {:.1} x {:.1}",
                            placements[i].name, placements[j].name, pen.x, pen.y, pen.z
                        ),
                    )
                    .for_case(placements[i].case_id.clone()),
                );
            }
        }
    }
}

fn check_flat_faces(sections: &[WallSection], config: &Config, diag: &mut Diagnostics) {
    for section in sections {
        if section.placements.is_empty() {
            continue;
        }
        let max_d = section
            .placements
            .iter()
            .map(|p| p.depth)
            .fold(f64::MIN, f64::max);
        let min_d = section
            .placements
            .iter()
            .map(|p| p.depth)
            .fold(f64::MAX, f64::min);
        let range = max_d - min_d;

        match FlatFaceGrade::from_range(range, config.depth_strict, config.depth_relaxed) {
            FlatFaceGrade::Ideal => {}
            FlatFaceGrade::Acceptable => diag.note(
                "validate",
                format!("{}: depth range {:.1} is acceptable", section.id, range),
            ),
            FlatFaceGrade::Critical => diag.violation(
                Violation::new(
                    ViolationKind::FlatFace,
                    format!("{}: depth range {:.1} exceeds the flat-face limit", section.id, range),
                )
                .in_wall(section.id.clone()),
            ),
        }
    }
}
