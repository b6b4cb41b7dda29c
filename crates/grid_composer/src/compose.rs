//! Placement orchestration: score, size, order and place every category.

use crate::{
    category::Category,
    config::{CanvasConfig, EngineConfig},
    error::Result,
    grid::{DropReason, Footprint, GridAllocator, SearchPhase},
    scoring::{CategoryMetrics, ItemsByCategory, score_items},
    sizing::{Dimensions, map_score_to_dimensions},
};

use itertools::Itertools;
use log::{debug, info, warn};
use serde::Serialize;
use strum::IntoEnumIterator;

/// A block that found a position. Origins are one-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedRectangle {
    pub category: Category,
    pub origin_row: usize,
    pub origin_col: usize,
    pub width: usize,
    pub height: usize,
    pub score: f64,
    pub phase: SearchPhase,
}

impl PlacedRectangle {
    fn from_allocation(plan: &CategoryPlan, footprint: Footprint, phase: SearchPhase) -> Self {
        Self {
            category: plan.category,
            origin_row: footprint.row + 1,
            origin_col: footprint.col + 1,
            width: footprint.width,
            height: footprint.height,
            score: plan.score,
            phase,
        }
    }

    /// Zero-indexed cell rectangle
    pub fn footprint(&self) -> Footprint {
        Footprint {
            row: self.origin_row.saturating_sub(1),
            col: self.origin_col.saturating_sub(1),
            width: self.width,
            height: self.height,
        }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// A category that had items but no position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DroppedCategory {
    pub category: Category,
    pub dimensions: Dimensions,
    pub score: f64,
    pub reason: DropReason,
}

/// Scored and sized category, before placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryPlan {
    pub category: Category,
    pub metrics: CategoryMetrics,
    pub score: f64,
    pub dimensions: Dimensions,
}

/// Result of one composition pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub canvas: CanvasConfig,
    pub placements: Vec<PlacedRectangle>,
    pub dropped: Vec<DroppedCategory>,
}

impl LayoutReport {
    pub fn placement(&self, category: Category) -> Option<&PlacedRectangle> {
        self.placements.iter().find(|p| p.category == category)
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Scores and sizes every non-empty category, in placement order.
///
/// Order is the fixed priority table first, then descending score.
pub fn plan_categories(items: &ItemsByCategory, config: &EngineConfig) -> Vec<CategoryPlan> {
    Category::iter()
        .filter_map(|category| {
            let (metrics, score) = score_items(items.get(&category)?, &config.weights)?;
            let dimensions = map_score_to_dimensions(
                score,
                category.importance_multiplier(),
                &config.canvas,
                config.aspect_ratio,
            );
            Some(CategoryPlan {
                category,
                metrics,
                score,
                dimensions,
            })
        })
        .sorted_by(|a, b| {
            a.category
                .priority()
                .cmp(&b.category.priority())
                .then_with(|| b.score.total_cmp(&a.score))
        })
        .collect()
}

/// Runs a full composition pass.
///
/// Categories without items are skipped. Categories that cannot be placed
/// are left out of `placements` and listed in `dropped`.
pub fn compose(items: &ItemsByCategory, config: &EngineConfig) -> Result<LayoutReport> {
    config.validate()?;

    let plans = plan_categories(items, config);
    let mut allocator = GridAllocator::new(config.canvas);
    let mut placements = Vec::with_capacity(plans.len());
    let mut dropped = Vec::new();
    let mut row_bound = 0;

    for plan in &plans {
        match allocator.allocate(plan.category, plan.dimensions, row_bound) {
            Ok(allocation) => {
                let fp = allocation.footprint;
                row_bound = row_bound.max(fp.row_end() + 1);
                debug!(
                    "placed {} ({:.1}) {}x{} at row {}, col {} [{}]",
                    plan.category,
                    plan.score,
                    fp.width,
                    fp.height,
                    fp.row + 1,
                    fp.col + 1,
                    allocation.phase
                );
                placements.push(PlacedRectangle::from_allocation(
                    plan,
                    fp,
                    allocation.phase,
                ));
            }
            Err(reason) => {
                warn!(
                    "dropped {} ({}x{}, score {:.1}): {}",
                    plan.category,
                    plan.dimensions.width,
                    plan.dimensions.height,
                    plan.score,
                    reason
                );
                dropped.push(DroppedCategory {
                    category: plan.category,
                    dimensions: plan.dimensions,
                    score: plan.score,
                    reason,
                });
            }
        }
    }

    info!(
        "composed {} of {} categories on a {}x{} canvas ({} cells used)",
        placements.len(),
        plans.len(),
        config.canvas.columns,
        config.canvas.rows,
        allocator.grid().occupied_count()
    );

    Ok(LayoutReport {
        canvas: config.canvas,
        placements,
        dropped,
    })
}

/// Placements only; dropped categories are silently omitted
pub fn compose_placements(
    items: &ItemsByCategory,
    config: &EngineConfig,
) -> Result<Vec<PlacedRectangle>> {
    compose(items, config).map(|report| report.placements)
}
