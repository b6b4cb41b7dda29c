pub mod allocator;
pub mod render;
pub mod search;
pub mod spacing;
pub mod types;

pub use allocator::{Allocation, DropReason, GridAllocator};
pub use render::render_ascii;
pub use search::{Anchor, ScanOrder, SearchPattern, SearchPhase};
pub use types::{Footprint, Grid, GridCell};
