use crate::{
    config::ScoringWeights,
    constants::{
        DURATION_SCALE_MINUTES, INTENSITY_CRITICAL, INTENSITY_HIGH, INTENSITY_LOW,
        INTENSITY_MEDIUM, ITEM_COUNT_SCALE, SCORE_SCALE, URGENT_COUNT_SCALE,
    },
    category::Category,
    error::{ComposeError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Qualitative intensity computed by the task source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl IntensityLevel {
    pub fn intensity(self) -> f64 {
        match self {
            IntensityLevel::Low => INTENSITY_LOW,
            IntensityLevel::Medium => INTENSITY_MEDIUM,
            IntensityLevel::High => INTENSITY_HIGH,
            IntensityLevel::Critical => INTENSITY_CRITICAL,
        }
    }
}

/// One unit of work inside a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub duration_minutes: u32,
    pub is_urgent: bool,
    pub intensity: f64, // [0, 1]
}

impl Item {
    /// Builds an item, rejecting intensities outside [0, 1]
    pub fn new(duration_minutes: u32, is_urgent: bool, intensity: f64) -> Result<Self> {
        if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
            return Err(ComposeError::InvalidIntensity {
                value: intensity.to_string(),
            });
        }
        Ok(Self {
            duration_minutes,
            is_urgent,
            intensity,
        })
    }

    pub fn with_level(duration_minutes: u32, is_urgent: bool, level: IntensityLevel) -> Self {
        Self {
            duration_minutes,
            is_urgent,
            intensity: level.intensity(),
        }
    }

    fn clamped_intensity(&self) -> f64 {
        if self.intensity.is_finite() {
            self.intensity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Items grouped by category, iterated in priority order
pub type ItemsByCategory = BTreeMap<Category, Vec<Item>>;

/// Aggregates of one category's items
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryMetrics {
    pub item_count: usize,
    pub total_duration: u64, // [min]
    pub mean_intensity: f64,
    pub urgent_count: usize,
    pub emotional_weight: f64, // peak intensity
}

impl CategoryMetrics {
    /// Returns `None` for an empty slice
    pub fn from_items(items: &[Item]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let item_count = items.len();
        let total_duration = items.iter().map(|i| u64::from(i.duration_minutes)).sum();
        let intensity_sum: f64 = items.iter().map(Item::clamped_intensity).sum();
        let urgent_count = items.iter().filter(|i| i.is_urgent).count();
        let emotional_weight = items
            .iter()
            .map(Item::clamped_intensity)
            .fold(0.0, f64::max);

        Some(Self {
            item_count,
            total_duration,
            mean_intensity: intensity_sum / item_count as f64,
            urgent_count,
            emotional_weight,
        })
    }

    /// Weighted importance, unbounded above (100 when every factor saturates)
    pub fn score(&self, weights: &ScoringWeights) -> f64 {
        let weighted = (self.item_count as f64 / ITEM_COUNT_SCALE) * weights.item_count
            + (self.total_duration as f64 / DURATION_SCALE_MINUTES) * weights.duration
            + self.mean_intensity * weights.intensity
            + (self.urgent_count as f64 / URGENT_COUNT_SCALE) * weights.urgency
            + self.emotional_weight * weights.emotional;
        weighted * SCORE_SCALE
    }
}

pub fn score_items(items: &[Item], weights: &ScoringWeights) -> Option<(CategoryMetrics, f64)> {
    let metrics = CategoryMetrics::from_items(items)?;
    let score = metrics.score(weights);
    Some((metrics, score))
}
