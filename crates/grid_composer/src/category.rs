use crate::constants::DEFAULT_MIN_GAP;
use crate::grid::search::{Anchor, ScanOrder, SearchPattern};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Life domain a block represents.
///
/// Variants are declared in placement priority order, so the derived `Ord`
/// and `Category::iter()` both follow the priority table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Urgent,
    Work,
    Relationships,
    Health,
    Growth,
    Maintenance,
}

/// Categories that keep their distance from members of other groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictGroup {
    Career,
    Personal,
}

impl Category {
    /// Placement priority (0 = placed first)
    pub fn priority(self) -> u8 {
        match self {
            Category::Urgent => 0,
            Category::Work => 1,
            Category::Relationships => 2,
            Category::Health => 3,
            Category::Growth => 4,
            Category::Maintenance => 5,
        }
    }

    /// Size bias applied on top of the score proportion
    pub fn importance_multiplier(self) -> f64 {
        match self {
            Category::Urgent => 1.3,
            Category::Work => 1.2,
            Category::Relationships => 1.1,
            Category::Health => 1.0,
            Category::Growth => 1.0,
            Category::Maintenance => 0.9,
        }
    }

    /// Minimum gap [cell] kept around the block
    pub fn min_gap(self) -> usize {
        match self {
            Category::Urgent
            | Category::Work
            | Category::Relationships
            | Category::Health
            | Category::Growth
            | Category::Maintenance => DEFAULT_MIN_GAP,
        }
    }

    pub fn conflict_group(self) -> Option<ConflictGroup> {
        match self {
            Category::Work => Some(ConflictGroup::Career),
            Category::Relationships => Some(ConflictGroup::Personal),
            Category::Urgent | Category::Health | Category::Growth | Category::Maintenance => None,
        }
    }

    /// True when `self` has to respect the spacing rule against a block owned by `other`
    pub fn conflicts_with(self, other: Category) -> bool {
        if self == other {
            return true;
        }
        match (self.conflict_group(), other.conflict_group()) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }

    /// Starting corner and scan direction of the first search phase
    pub fn preferred_pattern(self) -> SearchPattern {
        let (anchor, scan) = match self {
            Category::Urgent => (Anchor::TopLeft, ScanOrder::RowMajor),
            Category::Work => (Anchor::TopRight, ScanOrder::RowMajor),
            Category::Relationships => (Anchor::BottomLeft, ScanOrder::RowMajor),
            Category::Health => (Anchor::BottomRight, ScanOrder::ColumnMajor),
            Category::Growth => (Anchor::TopLeft, ScanOrder::ColumnMajor),
            Category::Maintenance => (Anchor::BottomRight, ScanOrder::RowMajor),
        };
        SearchPattern { anchor, scan }
    }
}
