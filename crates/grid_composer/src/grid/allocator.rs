use super::search::{SearchPhase, phase_candidates};
use super::spacing;
use super::types::{Footprint, Grid};
use crate::category::Category;
use crate::config::CanvasConfig;
use crate::sizing::Dimensions;

use log::{debug, trace};
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::Display;

/// Accepted position and the phase that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub footprint: Footprint,
    pub phase: SearchPhase,
}

/// Why a block found no position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// No in-bounds position with free cells
    NoFreeSpace,
    /// Free positions existed, all too close to a conflicting block
    SpacingConflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Accepted,
    Blocked,  // out of bounds or overlapping
    TooClose, // free, rejected by the spacing rule
}

/// Outcome of one search phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub found: Option<Footprint>,
    pub spacing_rejections: usize,
}

/// Owns the occupancy grid for a single composition pass
#[derive(Debug)]
pub struct GridAllocator {
    canvas: CanvasConfig,
    grid: Grid,
}

impl GridAllocator {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self {
            grid: Grid::new(&canvas),
            canvas,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn check(&self, candidate: &Footprint, category: Category) -> Verdict {
        if !self.grid.is_free(candidate) {
            Verdict::Blocked
        } else if !spacing::accepts(&self.grid, candidate, category) {
            Verdict::TooClose
        } else {
            Verdict::Accepted
        }
    }

    /// Runs one phase without touching the grid
    pub fn search_phase(
        &self,
        phase: SearchPhase,
        category: Category,
        dims: Dimensions,
        row_bound: usize,
    ) -> PhaseOutcome {
        let pattern = category.preferred_pattern();
        let mut spacing_rejections = 0;
        for (row, col) in phase_candidates(phase, pattern, dims, &self.canvas, row_bound) {
            let candidate = Footprint::new(row, col, dims);
            match self.check(&candidate, category) {
                Verdict::Accepted => {
                    return PhaseOutcome {
                        found: Some(candidate),
                        spacing_rejections,
                    };
                }
                Verdict::TooClose => spacing_rejections += 1,
                Verdict::Blocked => {}
            }
        }
        PhaseOutcome {
            found: None,
            spacing_rejections,
        }
    }

    /// Preferred pattern, then priority zone, then full grid.
    ///
    /// On success every footprint cell is marked as owned by `category`.
    pub fn allocate(
        &mut self,
        category: Category,
        dims: Dimensions,
        row_bound: usize,
    ) -> Result<Allocation, DropReason> {
        let mut spacing_rejections = 0;

        for phase in SearchPhase::iter() {
            let outcome = self.search_phase(phase, category, dims, row_bound);
            spacing_rejections += outcome.spacing_rejections;

            if let Some(footprint) = outcome.found {
                self.grid.occupy(&footprint, category);
                trace!(
                    "{category}: {}x{} at ({}, {}) via {phase}",
                    dims.width, dims.height, footprint.row, footprint.col
                );
                return Ok(Allocation { footprint, phase });
            }
            debug!(
                "{category}: {phase} search exhausted ({} spacing rejections)",
                outcome.spacing_rejections
            );
        }

        if spacing_rejections > 0 {
            Err(DropReason::SpacingConflict)
        } else {
            Err(DropReason::NoFreeSpace)
        }
    }
}
