use crate::category::Category;
use crate::compose::PlacedRectangle;
use crate::config::CanvasConfig;

const EMPTY_CELL: char = '.';

fn symbol(category: Category) -> char {
    match category {
        Category::Urgent => 'U',
        Category::Work => 'W',
        Category::Relationships => 'R',
        Category::Health => 'H',
        Category::Growth => 'G',
        Category::Maintenance => 'M',
    }
}

/// Monospace preview of a layout, one line per grid row.
///
/// Cells covered by more than one rectangle are drawn as `#`; a valid layout
/// never contains one.
pub fn render_ascii(canvas: &CanvasConfig, placements: &[PlacedRectangle]) -> String {
    let mut rows = vec![vec![EMPTY_CELL; canvas.columns]; canvas.rows];

    for p in placements {
        let fp = p.footprint();
        for (r, c) in fp.cells() {
            if let Some(cell) = rows.get_mut(r).and_then(|row| row.get_mut(c)) {
                *cell = if *cell == EMPTY_CELL {
                    symbol(p.category)
                } else {
                    '#'
                };
            }
        }
    }

    let mut out = String::with_capacity((canvas.columns + 1) * canvas.rows);
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
