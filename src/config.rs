//! Configuration management for exercise sessions

use crate::{
    constants::{
        DEFAULT_DOWN_THRESH, DEFAULT_EMA_ALPHA, DEFAULT_FPS, DEFAULT_SAVGOL_POLY_ORDER, DEFAULT_SAVGOL_WINDOW,
        DEFAULT_UP_THRESH,
    },
    exercise::Exercise,
    filters::SeriesSmoother,
    form_rules::RuleThresholds,
    rep_counter::{RepCounterConfig, RepTrigger},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exercise identifier
    pub exercise: String,

    /// Form rule thresholds
    pub rules: RuleThresholds,

    /// Smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Rep counter configuration
    pub counter: CounterConfig,
}

/// Smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Smoother type (savgol, ema, none)
    pub method: String,

    /// Savitzky-Golay window size (odd)
    pub window: usize,

    /// Savitzky-Golay polynomial order
    pub poly_order: usize,

    /// Exponential moving average alpha
    pub alpha: f64,
}

/// Rep counter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Angle at or below which the limb is curled
    pub up_thresh: f64,

    /// Angle at or above which the limb is extended
    pub down_thresh: f64,

    /// Debounce window in frames; derived from `fps` when absent
    pub min_gap: Option<usize>,

    /// Frame rate of the landmark source
    pub fps: f64,

    /// Transition that completes a repetition (extension, flexion)
    pub trigger: RepTrigger,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exercise: Exercise::BicepCurl.name().to_string(),
            rules: RuleThresholds::default(),
            smoothing: SmoothingConfig::default(),
            counter: CounterConfig::default(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            method: "savgol".to_string(),
            window: DEFAULT_SAVGOL_WINDOW,
            poly_order: DEFAULT_SAVGOL_POLY_ORDER,
            alpha: DEFAULT_EMA_ALPHA,
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            up_thresh: DEFAULT_UP_THRESH,
            down_thresh: DEFAULT_DOWN_THRESH,
            min_gap: None,
            fps: DEFAULT_FPS,
            trigger: RepTrigger::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Resolve the configured exercise
    pub fn exercise(&self) -> Result<Exercise> {
        self.exercise.parse()
    }

    /// Create a smoother from configuration
    pub fn create_smoother(&self) -> Result<Box<dyn SeriesSmoother>> {
        use crate::filters::create_smoother;

        match self.smoothing.method.to_lowercase().as_str() {
            "savgol" | "savitzky_golay" => create_smoother(&format!(
                "savgol:{}:{}",
                self.smoothing.window, self.smoothing.poly_order
            )),
            "ema" | "exponential" => create_smoother(&format!("ema:{}", self.smoothing.alpha)),
            name => create_smoother(name),
        }
    }

    /// Rep counter parameters, deriving the debounce gap from the frame rate
    /// when none is configured
    pub fn counter_config(&self) -> Result<RepCounterConfig> {
        let min_gap = match self.counter.min_gap {
            Some(gap) => gap,
            None => RepCounterConfig::min_gap_for_fps(self.counter.fps)?,
        };

        Ok(RepCounterConfig {
            up_thresh: self.counter.up_thresh,
            down_thresh: self.counter.down_thresh,
            min_gap,
            trigger: self.counter.trigger,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Surfaces unknown exercises at setup time
        self.exercise()?;

        // Validate rule thresholds
        let rules = &self.rules;
        if !(0.0..=180.0).contains(&rules.elbow_top) || !(0.0..=180.0).contains(&rules.elbow_bottom) {
            return Err(Error::ConfigError(
                "Elbow thresholds must be between 0 and 180 degrees".to_string(),
            ));
        }
        if rules.elbow_top >= rules.elbow_bottom {
            return Err(Error::ConfigError(
                "Elbow top threshold must be below the bottom threshold".to_string(),
            ));
        }
        if !(0.0..=180.0).contains(&rules.extension) {
            return Err(Error::ConfigError(
                "Extension threshold must be between 0 and 180 degrees".to_string(),
            ));
        }
        if !(rules.alignment_tolerance >= 0.0) || !(rules.symmetry_tolerance >= 0.0) {
            return Err(Error::ConfigError("Offset tolerances must be non-negative".to_string()));
        }

        // Validate smoother parameters
        self.create_smoother()
            .map_err(|e| Error::ConfigError(format!("Invalid smoothing settings: {e}")))?;

        // Validate counter parameters
        if !(self.counter.fps.is_finite() && self.counter.fps > 0.0) {
            return Err(Error::ConfigError("Frame rate must be greater than 0".to_string()));
        }
        self.counter_config()?.validate()?;

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Exercise form analysis configuration

# Exercise (bicep_curl, tricep_curl, lateral_raise, push_up)
exercise: "bicep_curl"

# Form rule thresholds
rules:
  elbow_top: 50.0
  elbow_bottom: 150.0
  extension: 160.0
  alignment_tolerance: 25.0
  symmetry_tolerance: 30.0

# Post-hoc smoothing (savgol, ema, none)
smoothing:
  method: "savgol"
  window: 11
  poly_order: 2
  alpha: 0.2

# Rep counting
counter:
  up_thresh: 60.0
  down_thresh: 150.0
  # min_gap: 9        # frames; derived from fps * 0.3 when omitted
  fps: 30.0
  trigger: "extension"
"#;
