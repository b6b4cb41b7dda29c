pub mod category;
pub mod compose;
pub mod config;
pub mod constants;
pub mod csv_reader;
pub mod error;
pub mod grid;
pub mod scoring;
pub mod sizing;

pub use category::{Category, ConflictGroup};
pub use compose::{
    CategoryPlan, DroppedCategory, LayoutReport, PlacedRectangle, compose, compose_placements,
    plan_categories,
};
pub use config::{CanvasConfig, CanvasPreset, Config, EngineConfig, ScoringWeights};
pub use constants::{DEFAULT_ASPECT_RATIO, MAX_SCORE};
pub use csv_reader::{read_items, read_items_csv, read_items_from_directory};
pub use error::{ComposeError, Result};
pub use grid::{DropReason, SearchPhase, render_ascii};
pub use scoring::{CategoryMetrics, IntensityLevel, Item, ItemsByCategory};
pub use sizing::{Dimensions, map_score_to_dimensions};
