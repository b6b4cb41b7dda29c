use crate::{
    constants::{
        DAY_CANVAS, DEFAULT_ASPECT_RATIO, MIN_CANVAS_CELLS, MONTH_CANVAS, WEEK_CANVAS,
        WEIGHT_DURATION, WEIGHT_EMOTIONAL, WEIGHT_INTENSITY, WEIGHT_ITEM_COUNT,
        WEIGHT_SUM_TOLERANCE, WEIGHT_URGENCY,
    },
    error::{ComposeError, Result},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Named canvas densities
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CanvasPreset {
    Day,
    Week,
    Month,
}

impl CanvasPreset {
    pub fn canvas(self) -> CanvasConfig {
        let (columns, rows) = match self {
            CanvasPreset::Day => DAY_CANVAS,
            CanvasPreset::Week => WEEK_CANVAS,
            CanvasPreset::Month => MONTH_CANVAS,
        };
        CanvasConfig { columns, rows }
    }
}

/// Canvas size [cell]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasPreset::Day.canvas()
    }
}

impl CanvasConfig {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns < MIN_CANVAS_CELLS || self.rows < MIN_CANVAS_CELLS {
            return Err(ComposeError::Config(format!(
                "canvas must be at least {MIN_CANVAS_CELLS}x{MIN_CANVAS_CELLS} cells, got {}x{}",
                self.columns, self.rows
            )));
        }
        Ok(())
    }
}

/// Weights of the importance score factors
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub item_count: f64,
    pub duration: f64,
    pub intensity: f64,
    pub urgency: f64,
    pub emotional: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            item_count: WEIGHT_ITEM_COUNT,
            duration: WEIGHT_DURATION,
            intensity: WEIGHT_INTENSITY,
            urgency: WEIGHT_URGENCY,
            emotional: WEIGHT_EMOTIONAL,
        }
    }
}

impl ScoringWeights {
    fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("item_count", self.item_count),
            ("duration", self.duration),
            ("intensity", self.intensity),
            ("urgency", self.urgency),
            ("emotional", self.emotional),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, w) in self.as_array() {
            if !w.is_finite() || w < 0.0 {
                return Err(ComposeError::Config(format!(
                    "scoring weight '{name}' must be a finite non-negative number, got {w}"
                )));
            }
        }
        let sum: f64 = self.as_array().iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ComposeError::Config(format!(
                "scoring weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Everything one composition pass needs besides the items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub weights: ScoringWeights,
    pub aspect_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            weights: ScoringWeights::default(),
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl EngineConfig {
    pub fn with_canvas(canvas: CanvasConfig) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.weights.validate()?;
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ComposeError::Config(format!(
                "aspect_ratio must be a positive number, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// `[canvas]` section: either a preset or explicit dimensions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CanvasSection {
    pub preset: Option<CanvasPreset>,
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

/// `[layout]` section
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSection {
    pub aspect_ratio: f64,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSection,
    pub scoring: ScoringWeights,
    pub layout: LayoutSection,
}

impl Config {
    /// Reads and validates a TOML configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ComposeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| {
            ComposeError::Config(format!(
                "Failed to load config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the file resolves to a valid engine configuration
    pub fn validate(&self) -> Result<()> {
        self.engine_config().map(|_| ())
    }

    pub fn canvas(&self) -> Result<CanvasConfig> {
        let section = &self.canvas;
        match (section.preset, section.columns, section.rows) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ComposeError::Config(
                "canvas: give either a preset or columns/rows, not both".to_string(),
            )),
            (Some(preset), None, None) => Ok(preset.canvas()),
            (None, Some(columns), Some(rows)) => Ok(CanvasConfig::new(columns, rows)),
            (None, Some(_), None) | (None, None, Some(_)) => Err(ComposeError::Config(
                "canvas: columns and rows must be given together".to_string(),
            )),
            (None, None, None) => Ok(CanvasConfig::default()),
        }
    }

    /// Resolve the file form into a validated engine configuration
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let engine = EngineConfig {
            canvas: self.canvas()?,
            weights: self.scoring,
            aspect_ratio: self.layout.aspect_ratio,
        };
        engine.validate()?;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let engine = Config::default().engine_config().unwrap();
        assert_eq!(engine.canvas, CanvasConfig::new(16, 12));
        assert_eq!(engine.weights, ScoringWeights::default());
        assert_eq!(engine.aspect_ratio, DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_presets() {
        assert_eq!(CanvasPreset::Day.canvas().cell_count(), 192);
        assert_eq!(CanvasPreset::Week.canvas(), CanvasConfig::new(20, 16));
        assert_eq!(CanvasPreset::Month.canvas(), CanvasConfig::new(24, 20));
        assert_eq!(CanvasPreset::from_str("Week").unwrap(), CanvasPreset::Week);
    }

    #[test]
    fn test_parse_preset_and_weights() {
        let config = Config::from_toml_str(
            r#"
            [canvas]
            preset = "month"

            [scoring]
            item_count = 0.2
            duration = 0.2
            intensity = 0.2
            urgency = 0.2
            emotional = 0.2

            [layout]
            aspect_ratio = 1.5
            "#,
        )
        .unwrap();
        let engine = config.engine_config().unwrap();
        assert_eq!(engine.canvas, CanvasConfig::new(24, 20));
        assert_eq!(engine.weights.emotional, 0.2);
        assert_eq!(engine.aspect_ratio, 1.5);
    }

    #[test]
    fn test_explicit_dimensions() {
        let config = Config::from_toml_str("[canvas]\ncolumns = 10\nrows = 8\n").unwrap();
        assert_eq!(config.canvas().unwrap(), CanvasConfig::new(10, 8));
    }

    #[test]
    fn test_rejects_tiny_canvas() {
        let err = Config::from_toml_str("[canvas]\ncolumns = 3\nrows = 8\n").unwrap_err();
        assert!(matches!(err, ComposeError::Config(_)));
        assert!(EngineConfig::with_canvas(CanvasConfig::new(8, 3)).validate().is_err());
        assert!(EngineConfig::with_canvas(CanvasConfig::new(4, 4)).validate().is_ok());
    }

    #[test]
    fn test_rejects_preset_with_dimensions() {
        let result = Config::from_toml_str("[canvas]\npreset = \"day\"\ncolumns = 10\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_partial_dimensions() {
        assert!(Config::from_toml_str("[canvas]\nrows = 10\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_preset() {
        assert!(Config::from_toml_str("[canvas]\npreset = \"year\"\n").is_err());
    }

    #[test]
    fn test_rejects_bad_weights() {
        let result = Config::from_toml_str("[scoring]\nitem_count = 0.5\n");
        assert!(result.is_err(), "weights summing to 1.25 must be rejected");

        let weights = ScoringWeights {
            item_count: -0.25,
            duration: 0.75,
            ..ScoringWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_aspect_ratio() {
        assert!(Config::from_toml_str("[layout]\naspect_ratio = 0.0\n").is_err());
        assert!(Config::from_toml_str("[layout]\naspect_ratio = -1.2\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[canvas]\npreset = \"week\"").unwrap();
        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.canvas().unwrap(), CanvasConfig::new(20, 16));
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from_file(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ComposeError::Config(_))));
    }
}
