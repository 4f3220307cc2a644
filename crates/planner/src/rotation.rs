//! Rotation oracle.
//!
//! Decides whether a group's cases ride in their base orientation or
//! swapped 90 degrees. The oracle runs twice with different objectives:
//! at inventory time it maximizes per-row width fill, and during orphan
//! rescue it maximizes depth compatibility with the other remaining
//! orphans. Walls must be depth-homogeneous before they can be
//! width-dense, so the rescue objective dominates the row fit there.

/// Minimum width/depth difference for a rotation to matter, inches.
const SQUARE_TOL: f64 = 0.5;

/// Weight of one depth-compatible orphan case against one per-row slot.
const COMPAT_WEIGHT: usize = 100;

/// Outcome of an oracle query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Keep the current width/depth.
    Keep,
    /// Swap width and depth.
    Swap,
}

/// Per-row fit of a width against the truck: count and covered width.
fn row_fit(width: f64, truck_width: f64) -> (u32, f64) {
    if width <= 0.0 {
        return (0, 0.0);
    }
    let per_row = (truck_width / width).floor() as u32;
    (per_row, per_row as f64 * width)
}

/// Packing-fit oracle: prefer the orientation with strictly larger
/// per-row fill, tie-break on larger per-row count.
pub fn packing_orientation(
    width: f64,
    depth: f64,
    allow_rotation: bool,
    truck_width: f64,
) -> Orientation {
    if !allow_rotation || (width - depth).abs() < SQUARE_TOL {
        return Orientation::Keep;
    }

    let (ipr_keep, fill_keep) = row_fit(width, truck_width);
    let (ipr_swap, fill_swap) = row_fit(depth, truck_width);

    if fill_swap > fill_keep || (fill_swap == fill_keep && ipr_swap > ipr_keep) {
        Orientation::Swap
    } else {
        Orientation::Keep
    }
}

/// Depth-compatibility oracle used during orphan rescue.
///
/// `other_depths` holds the current depth of every other remaining orphan
/// case. Each case within `depth_tol` of the candidate depth outweighs a
/// whole row slot by a factor of 100.
pub fn depth_compat_orientation(
    width: f64,
    depth: f64,
    allow_rotation: bool,
    truck_width: f64,
    depth_tol: f64,
    other_depths: &[f64],
) -> Orientation {
    if !allow_rotation || (width - depth).abs() < SQUARE_TOL {
        return Orientation::Keep;
    }

    let score = |w: f64, d: f64| -> usize {
        let compat = other_depths
            .iter()
            .filter(|&&od| (od - d).abs() <= depth_tol)
            .count();
        let (ipr, _) = row_fit(w, truck_width);
        compat * COMPAT_WEIGHT + ipr as usize
    };

    if score(depth, width) > score(width, depth) {
        Orientation::Swap
    } else {
        Orientation::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_prefers_larger_fill() {
        // 50 wide fits once (50), 20 wide fits four times (80).
        assert_eq!(
            packing_orientation(50.0, 20.0, true, 98.0),
            Orientation::Swap
        );
        // Already the better orientation.
        assert_eq!(
            packing_orientation(20.0, 50.0, true, 98.0),
            Orientation::Keep
        );
    }

    #[test]
    fn test_packing_respects_rotation_flag() {
        assert_eq!(
            packing_orientation(50.0, 20.0, false, 98.0),
            Orientation::Keep
        );
    }

    #[test]
    fn test_packing_skips_near_square() {
        assert_eq!(
            packing_orientation(30.0, 30.2, true, 98.0),
            Orientation::Keep
        );
    }

    #[test]
    fn test_packing_fill_tie_breaks_on_count() {
        // 49 fits twice (98), 24.5 fits four times (98): same fill, more
        // columns wins.
        assert_eq!(
            packing_orientation(49.0, 24.5, true, 98.0),
            Orientation::Swap
        );
    }

    #[test]
    fn test_depth_compat_dominates_row_fit() {
        // Keeping w=50 gives depth 20: no compatible orphans.
        // Swapping to w=20 gives depth 50: two compatible orphans.
        let others = [48.0, 52.0, 90.0];
        assert_eq!(
            depth_compat_orientation(50.0, 20.0, true, 98.0, 8.0, &others),
            Orientation::Swap
        );
    }

    #[test]
    fn test_depth_compat_keeps_when_equal() {
        // No other orphans: both scores reduce to row fit; 20-wide wins.
        assert_eq!(
            depth_compat_orientation(50.0, 20.0, true, 98.0, 8.0, &[]),
            Orientation::Swap
        );
        // Symmetric scores on both sides: keep.
        let others = [40.0, 44.0];
        assert_eq!(
            depth_compat_orientation(40.0, 44.0, true, 98.0, 8.0, &others),
            Orientation::Keep
        );
    }
}
