/// Scoring weights (item count, duration, mean intensity, urgency, emotional weight)
pub const WEIGHT_ITEM_COUNT: f64 = 0.25;
pub const WEIGHT_DURATION: f64 = 0.25;
pub const WEIGHT_INTENSITY: f64 = 0.20;
pub const WEIGHT_URGENCY: f64 = 0.20;
pub const WEIGHT_EMOTIONAL: f64 = 0.10;
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Saturation points of each scoring factor
pub const ITEM_COUNT_SCALE: f64 = 10.0; // items
pub const DURATION_SCALE_MINUTES: f64 = 480.0; // one working day
pub const URGENT_COUNT_SCALE: f64 = 5.0; // urgent items

/// Score scaling
pub const SCORE_SCALE: f64 = 100.0;
pub const MAX_SCORE: f64 = SCORE_SCALE; // every factor saturated at 1.0

/// Block shape
pub const DEFAULT_ASPECT_RATIO: f64 = 1.2; // slightly wider than tall
pub const MIN_BLOCK_CELLS: usize = 2; // minimum block side [cell]
pub const CANVAS_MARGIN_CELLS: usize = 2; // block side <= canvas side - margin
pub const MIN_CANVAS_CELLS: usize = MIN_BLOCK_CELLS + CANVAS_MARGIN_CELLS; // 4

/// Spacing
pub const DEFAULT_MIN_GAP: usize = 2; // [cell], every direction

/// Search
pub const PREFERRED_ATTEMPT_FRACTION: f64 = 0.4; // attempts per line / scanned axis
pub const PRIORITY_ZONE_FRACTION: f64 = 0.7; // top-left zone per axis

/// Canvas presets (columns, rows)
pub const DAY_CANVAS: (usize, usize) = (16, 12);
pub const WEEK_CANVAS: (usize, usize) = (20, 16);
pub const MONTH_CANVAS: (usize, usize) = (24, 20);

/// Qualitative intensity levels -> intensity
pub const INTENSITY_LOW: f64 = 0.25;
pub const INTENSITY_MEDIUM: f64 = 0.5;
pub const INTENSITY_HIGH: f64 = 0.75;
pub const INTENSITY_CRITICAL: f64 = 1.0;

/// Expected headers in item CSV files
pub const EXPECTED_CATEGORY_HEADER: &str = "Category";
pub const EXPECTED_DURATION_HEADER: &str = "Duration";
pub const EXPECTED_URGENT_HEADER: &str = "Urgent";
pub const EXPECTED_INTENSITY_HEADER: &str = "Intensity";
