use super::types::{Footprint, Grid};
use crate::category::Category;

/// Minimum-gap rule between a candidate block and the blocks already placed.
///
/// Only owners that conflict with `category` (the same category, or a
/// different conflict group) are considered; everything else is allowed to
/// touch the candidate as long as cells do not overlap.
pub fn accepts(grid: &Grid, candidate: &Footprint, category: Category) -> bool {
    let gap = category.min_gap();
    if gap == 0 {
        return true;
    }

    let region = candidate.expanded(gap, grid.columns(), grid.rows());
    region.cells().all(|(r, c)| match grid.cell(r, c) {
        Some(cell) if cell.occupied => match cell.owner {
            Some(owner) if category.conflicts_with(owner) => {
                candidate.distance_to_cell(r, c) >= gap
            }
            _ => true,
        },
        _ => true,
    })
}
