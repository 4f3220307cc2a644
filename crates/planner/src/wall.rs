//! Internal wall model: columns, walls and reliability tiers.

use wallplan_core::Case;

/// Stability classification of a wall, from most to least reliable.
///
/// The tiers form a total order. Demotion always takes the worse of the
/// current and proposed tier; a wall is never silently promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reliability {
    /// Single-group grid filling most of the truck width.
    FullWall = 1,
    /// Knowledge-base recipe wall (reserved).
    KbCombo = 2,
    /// Full wall completed with gap-fill columns.
    TightFit = 3,
    /// Orphan wall built from one department.
    OrphanSameDept = 4,
    /// Orphan wall mixing departments.
    OrphanMixed = 5,
}

impl Reliability {
    /// Numeric rank; lower is more reliable.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Short human-readable tag used in stage labels.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullWall => "Full Wall",
            Self::KbCombo => "KB Combo",
            Self::TightFit => "Tight Fit",
            Self::OrphanSameDept => "Same-Dept Orphans",
            Self::OrphanMixed => "Mixed Orphans",
        }
    }
}

/// One vertical stack of identical cases at a given x offset.
#[derive(Debug, Clone)]
pub struct Column {
    /// Group tag the cases packed under.
    pub group: String,
    /// Department tag.
    pub dept: String,
    /// Placed width, inches.
    pub width: f64,
    /// Placed depth, inches.
    pub depth: f64,
    /// Per-case height, inches.
    pub height: f64,
    /// Rotation applied to the cases, degrees.
    pub rotation: f64,
    /// Owned cases, bottom to top.
    pub cases: Vec<Case>,
    /// Offset from the wall-local origin, inches.
    pub x_off: f64,
}

impl Column {
    /// Stack count.
    pub fn count(&self) -> usize {
        self.cases.len()
    }

    /// Total stacked height, inches.
    pub fn stacked_height(&self) -> f64 {
        self.height * self.cases.len() as f64
    }
}

/// A transverse slice of the cargo hold under construction.
#[derive(Debug, Clone)]
pub struct Wall {
    /// Columns left to right.
    pub columns: Vec<Column>,
    /// Reliability tier.
    pub reliability: Reliability,
    /// Whether this wall is a floor-panel wall.
    pub is_floor: bool,
}

impl Wall {
    /// Creates an empty wall at the given tier.
    pub fn new(reliability: Reliability) -> Self {
        Self {
            columns: Vec::new(),
            reliability,
            is_floor: false,
        }
    }

    /// Appends a column at the current right edge.
    pub fn push_column(&mut self, mut column: Column) {
        column.x_off = self.width_fill();
        self.columns.push(column);
    }

    /// Cumulative column width, inches.
    pub fn width_fill(&self) -> f64 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Width fill as a ratio of the truck width.
    pub fn fill_ratio(&self, truck_width: f64) -> f64 {
        if truck_width <= 0.0 {
            return 0.0;
        }
        self.width_fill() / truck_width
    }

    /// Tallest stacked column height, inches.
    pub fn max_height(&self) -> f64 {
        self.columns
            .iter()
            .map(Column::stacked_height)
            .fold(0.0, f64::max)
    }

    /// Wall depth: the deepest column, inches.
    pub fn depth(&self) -> f64 {
        self.columns.iter().map(|c| c.depth).fold(0.0, f64::max)
    }

    /// Shallowest column depth, inches.
    pub fn min_depth(&self) -> f64 {
        self.columns
            .iter()
            .map(|c| c.depth)
            .fold(f64::INFINITY, f64::min)
    }

    /// Door-facing depth spread, inches.
    pub fn depth_range(&self) -> f64 {
        if self.columns.is_empty() {
            return 0.0;
        }
        self.depth() - self.min_depth()
    }

    /// Spread between tallest and shortest column, inches.
    pub fn height_range(&self) -> f64 {
        if self.columns.is_empty() {
            return 0.0;
        }
        let min = self
            .columns
            .iter()
            .map(Column::stacked_height)
            .fold(f64::INFINITY, f64::min);
        self.max_height() - min
    }

    /// Whether the wall presents a flat top to the next wall.
    pub fn flat_top(&self) -> bool {
        self.height_range() < 0.5
    }

    /// Number of cases across all columns.
    pub fn case_count(&self) -> usize {
        self.columns.iter().map(Column::count).sum()
    }

    /// Contributing group tags in first-appearance order.
    pub fn group_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for column in &self.columns {
            if !tags.contains(&column.group.as_str()) {
                tags.push(&column.group);
            }
        }
        tags
    }

    /// Department owning the most cases; ties go to the earlier column.
    pub fn majority_dept(&self) -> String {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for column in &self.columns {
            match counts.iter_mut().find(|(d, _)| *d == column.dept.as_str()) {
                Some((_, n)) => *n += column.count(),
                None => counts.push((&column.dept, column.count())),
            }
        }
        let mut best: Option<(&str, usize)> = None;
        for &(dept, n) in &counts {
            if best.map_or(true, |(_, bn)| n > bn) {
                best = Some((dept, n));
            }
        }
        best.map(|(d, _)| d.to_string()).unwrap_or_default()
    }

    /// Whether every column belongs to one department.
    pub fn single_dept(&self) -> bool {
        self.group_depts().len() <= 1
    }

    /// Whether every column belongs to one group.
    pub fn single_group(&self) -> bool {
        self.group_tags().len() <= 1
    }

    /// Demotes the reliability, keeping the worse tier.
    pub fn demote(&mut self, proposed: Reliability) {
        if proposed > self.reliability {
            self.reliability = proposed;
        }
    }

    fn group_depts(&self) -> Vec<&str> {
        let mut depts: Vec<&str> = Vec::new();
        for column in &self.columns {
            if !depts.contains(&column.dept.as_str()) {
                depts.push(&column.dept);
            }
        }
        depts
    }
}
