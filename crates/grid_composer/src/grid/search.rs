//! Candidate origins for each search phase.
//!
//! Every phase is a lazy sequence of zero-indexed `(row, col)` origins. The
//! allocator consumes them in order and stops at the first one that
//! validates, so the phases differ only in the order they produce.

use crate::config::CanvasConfig;
use crate::constants::{PREFERRED_ATTEMPT_FRACTION, PRIORITY_ZONE_FRACTION};
use crate::sizing::Dimensions;

use itertools::iproduct;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Corner a preferred search starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopRight)
    }

    fn is_left(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::BottomLeft)
    }
}

/// Axis stepped first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanOrder {
    RowMajor,    // along a row, then the next row
    ColumnMajor, // along a column, then the next column
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchPattern {
    pub anchor: Anchor,
    pub scan: ScanOrder,
}

/// Search phases, in the order the allocator tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SearchPhase {
    Preferred,
    PriorityZone,
    FullGrid,
}

pub type Origin = (usize, usize);

/// Attempts per line of the preferred pattern: ceil(40% of the scanned axis)
pub fn preferred_attempts(axis_len: usize) -> usize {
    ((axis_len as f64 * PREFERRED_ATTEMPT_FRACTION).ceil() as usize).max(1)
}

/// Origins of the top-left priority zone: floor(70%) per axis
pub fn priority_zone(canvas: &CanvasConfig) -> (usize, usize) {
    let zone = |len: usize| ((len as f64 * PRIORITY_ZONE_FRACTION).floor() as usize).max(1);
    (zone(canvas.rows), zone(canvas.columns))
}

/// `bound..len` followed by `0..bound`
fn rows_from(len: usize, bound: usize) -> impl Iterator<Item = usize> {
    let start = bound.min(len);
    (start..len).chain(0..start)
}

/// Anchor-relative steps over the anchor's half of the canvas
pub fn preferred_candidates(
    pattern: SearchPattern,
    dims: Dimensions,
    canvas: &CanvasConfig,
) -> impl Iterator<Item = Origin> + use<> {
    let (scan_len, line_len) = match pattern.scan {
        ScanOrder::RowMajor => (canvas.columns, canvas.rows),
        ScanOrder::ColumnMajor => (canvas.rows, canvas.columns),
    };
    let attempts = preferred_attempts(scan_len);
    let lines = (line_len / 2).max(1);

    let anchor = pattern.anchor;
    let scan = pattern.scan;
    let last_row = canvas.rows.checked_sub(dims.height);
    let last_col = canvas.columns.checked_sub(dims.width);

    iproduct!(0..lines, 0..attempts).filter_map(move |(line, step)| {
        let (row_off, col_off) = match scan {
            ScanOrder::RowMajor => (line, step),
            ScanOrder::ColumnMajor => (step, line),
        };
        let row = if anchor.is_top() {
            Some(row_off)
        } else {
            last_row?.checked_sub(row_off)
        }?;
        let col = if anchor.is_left() {
            Some(col_off)
        } else {
            last_col?.checked_sub(col_off)
        }?;
        Some((row, col))
    })
}

/// Row-major over the priority zone, starting at `row_bound`
pub fn priority_zone_candidates(
    canvas: &CanvasConfig,
    row_bound: usize,
) -> impl Iterator<Item = Origin> + use<> {
    let (zone_rows, zone_cols) = priority_zone(canvas);
    iproduct!(rows_from(zone_rows, row_bound), 0..zone_cols)
}

/// Row-major over the whole canvas, starting at `row_bound`
pub fn full_grid_candidates(
    canvas: &CanvasConfig,
    row_bound: usize,
) -> impl Iterator<Item = Origin> + use<> {
    iproduct!(rows_from(canvas.rows, row_bound), 0..canvas.columns)
}

pub fn phase_candidates(
    phase: SearchPhase,
    pattern: SearchPattern,
    dims: Dimensions,
    canvas: &CanvasConfig,
    row_bound: usize,
) -> Box<dyn Iterator<Item = Origin>> {
    match phase {
        SearchPhase::Preferred => Box::new(preferred_candidates(pattern, dims, canvas)),
        SearchPhase::PriorityZone => Box::new(priority_zone_candidates(canvas, row_bound)),
        SearchPhase::FullGrid => Box::new(full_grid_candidates(canvas, row_bound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> CanvasConfig {
        CanvasConfig::new(16, 12)
    }

    fn pattern(anchor: Anchor, scan: ScanOrder) -> SearchPattern {
        SearchPattern { anchor, scan }
    }

    #[test]
    fn test_attempt_budget() {
        assert_eq!(preferred_attempts(16), 7);
        assert_eq!(preferred_attempts(12), 5);
        assert_eq!(preferred_attempts(4), 2);
        assert_eq!(preferred_attempts(1), 1);
    }

    #[test]
    fn test_top_left_row_major() {
        let dims = Dimensions::new(4, 3);
        let c: Vec<Origin> =
            preferred_candidates(pattern(Anchor::TopLeft, ScanOrder::RowMajor), dims, &day())
                .collect();
        assert_eq!(c.len(), 6 * 7);
        assert_eq!(&c[..3], &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(c[7], (1, 0));
    }

    #[test]
    fn test_bottom_right_column_major() {
        let dims = Dimensions::new(4, 3);
        let c: Vec<Origin> = preferred_candidates(
            pattern(Anchor::BottomRight, ScanOrder::ColumnMajor),
            dims,
            &day(),
        )
        .collect();
        // flush in the corner, then upwards
        assert_eq!(&c[..3], &[(9, 12), (8, 12), (7, 12)]);
        // 5 attempts per column, then one column to the left
        assert_eq!(c[5], (9, 11));
        assert_eq!(c.len(), 8 * 5);
    }

    #[test]
    fn test_right_anchor_skips_negative_origins() {
        let canvas = CanvasConfig::new(4, 4);
        let dims = Dimensions::new(2, 2);
        let c: Vec<Origin> = preferred_candidates(
            pattern(Anchor::TopRight, ScanOrder::RowMajor),
            dims,
            &canvas,
        )
        .collect();
        assert_eq!(c, vec![(0, 2), (0, 1), (1, 2), (1, 1)]);
    }

    #[test]
    fn test_priority_zone_extent() {
        assert_eq!(priority_zone(&day()), (8, 11));
        let c: Vec<Origin> = priority_zone_candidates(&day(), 0).collect();
        assert_eq!(c.len(), 8 * 11);
        assert_eq!(c.first(), Some(&(0, 0)));
        assert_eq!(c.last(), Some(&(7, 10)));
    }

    #[test]
    fn test_row_bound_rotates_rows() {
        let c: Vec<Origin> = full_grid_candidates(&day(), 5).collect();
        assert_eq!(c.len(), 16 * 12);
        assert_eq!(c[0], (5, 0));
        assert_eq!(c[16 * 7], (0, 0));
        // a bound past the zone falls back to the natural order
        let z: Vec<Origin> = priority_zone_candidates(&day(), 20).collect();
        assert_eq!(z[0], (0, 0));
    }

    #[test]
    fn test_phase_dispatch() {
        let dims = Dimensions::new(2, 2);
        let p = pattern(Anchor::TopLeft, ScanOrder::RowMajor);
        assert_eq!(
            phase_candidates(SearchPhase::FullGrid, p, dims, &day(), 0).count(),
            192
        );
        assert_eq!(
            phase_candidates(SearchPhase::Preferred, p, dims, &day(), 0).next(),
            Some((0, 0))
        );
    }
}
