use crate::category::Category;
use crate::config::CanvasConfig;
use crate::sizing::Dimensions;

/// Information for a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCell {
    pub occupied: bool,
    pub owner: Option<Category>,
}

/// Rectangle of cells, zero-indexed origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Footprint {
    pub fn new(row: usize, col: usize, dims: Dimensions) -> Self {
        Self {
            row,
            col,
            width: dims.width,
            height: dims.height,
        }
    }

    /// One past the last row
    #[inline]
    pub fn row_end(&self) -> usize {
        self.row + self.height
    }

    /// One past the last column
    #[inline]
    pub fn col_end(&self) -> usize {
        self.col + self.width
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (row, row_end, col, col_end) = (self.row, self.row_end(), self.col, self.col_end());
        (row..row_end).flat_map(move |r| (col..col_end).map(move |c| (r, c)))
    }

    pub fn intersects(&self, other: &Footprint) -> bool {
        self.row < other.row_end()
            && other.row < self.row_end()
            && self.col < other.col_end()
            && other.col < self.col_end()
    }

    /// Empty rows and columns between two rectangles; 0 on an axis where they overlap
    pub fn axis_gaps(&self, other: &Footprint) -> (usize, usize) {
        (
            span_gap(self.row, self.row_end(), other.row, other.row_end()),
            span_gap(self.col, self.col_end(), other.col, other.col_end()),
        )
    }

    /// Cell distance: the larger of the two axis gaps
    pub fn distance_to(&self, other: &Footprint) -> usize {
        let (rows, cols) = self.axis_gaps(other);
        rows.max(cols)
    }

    /// Distance from a single cell to this rectangle
    pub fn distance_to_cell(&self, row: usize, col: usize) -> usize {
        self.distance_to(&Footprint {
            row,
            col,
            width: 1,
            height: 1,
        })
    }

    /// Grown by `margin` on every side, clipped to the grid
    pub fn expanded(&self, margin: usize, columns: usize, rows: usize) -> Footprint {
        let row = self.row.saturating_sub(margin);
        let col = self.col.saturating_sub(margin);
        let row_end = (self.row_end() + margin).min(rows);
        let col_end = (self.col_end() + margin).min(columns);
        Footprint {
            row,
            col,
            width: col_end.saturating_sub(col),
            height: row_end.saturating_sub(row),
        }
    }
}

#[inline]
fn span_gap(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> usize {
    if a_end <= b_start {
        b_start - a_end
    } else if b_end <= a_start {
        a_start - b_end
    } else {
        0
    }
}

/// Occupancy grid owned by one allocation pass, `cells[row * columns + col]`
#[derive(Debug, Clone)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    pub fn new(canvas: &CanvasConfig) -> Self {
        Self {
            columns: canvas.columns,
            rows: canvas.rows,
            cells: vec![GridCell::default(); canvas.cell_count()],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.columns + col
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row < self.rows && col < self.columns {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    pub fn contains(&self, fp: &Footprint) -> bool {
        fp.width > 0 && fp.height > 0 && fp.row_end() <= self.rows && fp.col_end() <= self.columns
    }

    /// Every cell inside the canvas and unoccupied
    pub fn is_free(&self, fp: &Footprint) -> bool {
        self.contains(fp) && fp.cells().all(|(r, c)| !self.cells[self.index(r, c)].occupied)
    }

    pub fn occupy(&mut self, fp: &Footprint, owner: Category) {
        debug_assert!(self.contains(fp));
        for (r, c) in fp.cells() {
            let idx = self.index(r, c);
            self.cells[idx] = GridCell {
                occupied: true,
                owner: Some(owner),
            };
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(row: usize, col: usize, width: usize, height: usize) -> Footprint {
        Footprint {
            row,
            col,
            width,
            height,
        }
    }

    #[test]
    fn test_intersects() {
        let a = fp(0, 0, 3, 3);
        assert!(a.intersects(&fp(2, 2, 2, 2)));
        assert!(!a.intersects(&fp(3, 0, 2, 2)));
        assert!(!a.intersects(&fp(0, 3, 2, 2)));
    }

    #[test]
    fn test_distance() {
        let a = fp(0, 0, 3, 3);
        assert_eq!(a.distance_to(&fp(0, 3, 2, 2)), 0); // touching
        assert_eq!(a.distance_to(&fp(0, 5, 2, 2)), 2);
        assert_eq!(a.distance_to(&fp(4, 6, 2, 2)), 3);
        assert_eq!(a.axis_gaps(&fp(4, 6, 2, 2)), (1, 3));
        assert_eq!(a.distance_to_cell(4, 1), 1);
    }

    #[test]
    fn test_expanded_clips_to_grid() {
        let e = fp(1, 1, 2, 2).expanded(2, 5, 4);
        assert_eq!(e, fp(0, 0, 5, 4));
        let e = fp(5, 5, 2, 2).expanded(2, 16, 12);
        assert_eq!(e, fp(3, 3, 6, 6));
    }

    #[test]
    fn test_occupy_and_free() {
        let mut grid = Grid::new(&CanvasConfig::new(6, 4));
        let a = fp(0, 0, 2, 2);
        assert!(grid.is_free(&a));
        grid.occupy(&a, Category::Work);
        assert!(!grid.is_free(&a));
        assert!(!grid.is_free(&fp(1, 1, 2, 2)));
        assert!(grid.is_free(&fp(0, 2, 2, 2)));
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(grid.cell(1, 1).and_then(|c| c.owner), Some(Category::Work));
        assert!(grid.cell(4, 0).is_none());
    }

    #[test]
    fn test_out_of_bounds_is_not_free() {
        let grid = Grid::new(&CanvasConfig::new(6, 4));
        assert!(!grid.is_free(&fp(3, 0, 2, 2)));
        assert!(!grid.is_free(&fp(0, 5, 2, 2)));
        assert!(grid.is_free(&fp(2, 4, 2, 2)));
    }
}
