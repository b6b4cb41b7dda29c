use crate::{
    config::CanvasConfig,
    constants::{CANVAS_MARGIN_CELLS, MAX_SCORE, MIN_BLOCK_CELLS},
};
use serde::Serialize;

/// Block size [cell]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Largest block side the canvas allows on an axis of `len` cells
#[inline]
fn max_side(len: usize) -> usize {
    len.saturating_sub(CANVAS_MARGIN_CELLS).max(MIN_BLOCK_CELLS)
}

/// Number of cells a score asks for
pub fn target_cells(score: f64, multiplier: f64, canvas: &CanvasConfig) -> usize {
    let proportion = if score.is_finite() {
        (score / MAX_SCORE).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let multiplier = if multiplier.is_finite() {
        multiplier.max(0.0)
    } else {
        0.0
    };
    (canvas.cell_count() as f64 * proportion * multiplier).floor() as usize
}

/// Tallest block a narrower `width` may take during the fallback scan.
///
/// At least `width + 1`, and never below the height `width` reaches while it
/// is itself the aspect-derived width, so stepping the aspect-derived width
/// up cannot shrink the result.
fn narrow_height_cap(width: usize, aspect_ratio: f64) -> usize {
    let square = width + 1;
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return square;
    }
    // largest target whose aspect-derived width is still `width`
    let last_target = ((square * square) as f64 / aspect_ratio).floor();
    if !last_target.is_finite() {
        return square;
    }
    square.max(last_target as usize / width)
}

/// Shape for `target` cells.
///
/// The aspect-derived width and its height `clamp(t / width, 2, rows - 2)`
/// come first. Narrower widths are only taken when they give strictly more
/// area, and their heights are capped by `narrow_height_cap` so the scan does
/// not turn blocks into tall strips. The result area is non-decreasing in
/// `target`.
pub fn dimensions_for_target(target: usize, canvas: &CanvasConfig, aspect_ratio: f64) -> Dimensions {
    let max_w = max_side(canvas.columns);
    let max_h = max_side(canvas.rows);

    let ideal = ((target as f64) * aspect_ratio).sqrt().floor();
    let widest = if ideal.is_finite() && ideal > 0.0 {
        (ideal as usize).clamp(MIN_BLOCK_CELLS, max_w)
    } else {
        MIN_BLOCK_CELLS
    };

    let height_for = |width: usize| (target / width).clamp(MIN_BLOCK_CELLS, max_h);

    let mut best = Dimensions::new(widest, height_for(widest));
    let mut best_area = best.area();
    for width in (MIN_BLOCK_CELLS..widest).rev() {
        let height = height_for(width).min(narrow_height_cap(width, aspect_ratio));
        let area = width * height;
        if area > best_area {
            best = Dimensions::new(width, height);
            best_area = area;
        }
    }
    best
}

/// Size Mapper: score -> block dimensions
pub fn map_score_to_dimensions(
    score: f64,
    multiplier: f64,
    canvas: &CanvasConfig,
    aspect_ratio: f64,
) -> Dimensions {
    let target = target_cells(score, multiplier, canvas);
    dimensions_for_target(target, canvas, aspect_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasPreset;
    use crate::constants::DEFAULT_ASPECT_RATIO;
    use strum::IntoEnumIterator;

    fn day() -> CanvasConfig {
        CanvasPreset::Day.canvas()
    }

    fn dims(target: usize) -> Dimensions {
        dimensions_for_target(target, &day(), DEFAULT_ASPECT_RATIO)
    }

    #[test]
    fn test_target_cells() {
        assert_eq!(target_cells(50.0, 1.0, &day()), 96);
        assert_eq!(target_cells(50.0, 1.3, &day()), 124);
        // proportion saturates at 1.0
        assert_eq!(target_cells(250.0, 1.0, &day()), 192);
        assert_eq!(target_cells(-3.0, 1.0, &day()), 0);
        assert_eq!(target_cells(f64::NAN, 1.0, &day()), 0);
    }

    #[test]
    fn test_reference_shapes() {
        assert_eq!(dims(25), Dimensions::new(5, 5));
        assert_eq!(dims(23), Dimensions::new(5, 4));
        assert_eq!(dims(20), Dimensions::new(4, 5));
        assert_eq!(dims(19), Dimensions::new(4, 4));
        assert_eq!(dims(40), Dimensions::new(6, 6));
    }

    #[test]
    fn test_width_step_does_not_shrink_area() {
        // floor(41 / 7) would give 7x5 = 35 < 36
        assert_eq!(dims(41), Dimensions::new(6, 6));
        assert!(dims(41).area() >= dims(40).area());
    }

    #[test]
    fn test_minimum_block() {
        assert_eq!(dims(0), Dimensions::new(2, 2));
        assert_eq!(dims(3), Dimensions::new(2, 2));
        assert!(dims(1).area() >= 4);
    }

    #[test]
    fn test_width_clamps_to_canvas_margin() {
        let d = map_score_to_dimensions(1_000.0, 1.3, &day(), DEFAULT_ASPECT_RATIO);
        assert_eq!(d.width, day().columns - 2);
        assert_eq!(d.height, day().rows - 2);
    }

    #[test]
    fn test_area_is_monotonic_in_target() {
        for preset in CanvasPreset::iter() {
            let canvas = preset.canvas();
            let mut prev = 0;
            for target in 0..=canvas.cell_count() * 2 {
                let d = dimensions_for_target(target, &canvas, DEFAULT_ASPECT_RATIO);
                assert!(
                    d.area() >= prev,
                    "{preset}: area shrank at target {target}: {d:?}"
                );
                prev = d.area();
            }
        }
    }

    #[test]
    fn test_bounds_for_every_target() {
        for preset in CanvasPreset::iter() {
            let canvas = preset.canvas();
            for target in 0..=canvas.cell_count() * 2 {
                let d = dimensions_for_target(target, &canvas, DEFAULT_ASPECT_RATIO);
                assert!((2..=canvas.columns - 2).contains(&d.width));
                assert!((2..=canvas.rows - 2).contains(&d.height));
                assert!(d.height <= d.width + 1);
            }
        }
    }

    #[test]
    fn test_aspect_width_keeps_full_height_on_narrow_canvas() {
        // width clamps to 4, height follows t / width up to rows - 2
        let canvas = CanvasConfig::new(6, 20);
        let d = dimensions_for_target(120, &canvas, DEFAULT_ASPECT_RATIO);
        assert_eq!(d, Dimensions::new(4, 18));
        let d = dimensions_for_target(40, &canvas, DEFAULT_ASPECT_RATIO);
        assert_eq!(d, Dimensions::new(4, 10));
    }

    #[test]
    fn test_low_aspect_ratio_gives_tall_blocks() {
        // floor(sqrt(100 * 0.5)) = 7, floor(100 / 7) = 14 -> rows - 2
        assert_eq!(dimensions_for_target(100, &day(), 0.5), Dimensions::new(7, 10));
        let tall = CanvasConfig::new(16, 40);
        assert_eq!(dimensions_for_target(100, &tall, 0.5), Dimensions::new(7, 14));
    }

    #[test]
    fn test_narrow_height_cap() {
        for width in 2..20 {
            assert_eq!(narrow_height_cap(width, DEFAULT_ASPECT_RATIO), width + 1);
            assert!(narrow_height_cap(width, 0.5) >= 2 * width);
        }
        assert_eq!(narrow_height_cap(4, 0.0), 5);
        assert_eq!(narrow_height_cap(4, f64::NAN), 5);
    }

    #[test]
    fn test_area_is_monotonic_for_any_shape() {
        let canvases = [
            CanvasConfig::new(6, 20),
            CanvasConfig::new(20, 6),
            CanvasConfig::new(4, 30),
            CanvasPreset::Day.canvas(),
            CanvasPreset::Month.canvas(),
        ];
        for canvas in canvases {
            for aspect in [0.5, 1.0, DEFAULT_ASPECT_RATIO, 2.0] {
                let mut prev = 0;
                for target in 0..=canvas.cell_count() * 2 {
                    let d = dimensions_for_target(target, &canvas, aspect);
                    assert!(
                        d.area() >= prev,
                        "{canvas:?} aspect {aspect}: area shrank at target {target}: {d:?}"
                    );
                    assert!(d.width + 2 <= canvas.columns && d.height + 2 <= canvas.rows);
                    prev = d.area();
                }
            }
        }
    }

    #[test]
    fn test_smallest_canvas() {
        let canvas = CanvasConfig::new(4, 4);
        for target in [0, 4, 16, 100] {
            let d = dimensions_for_target(target, &canvas, DEFAULT_ASPECT_RATIO);
            assert_eq!(d, Dimensions::new(2, 2));
        }
    }
}
