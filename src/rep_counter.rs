//! Hysteresis repetition counter.
//!
//! A repetition is confirmed when the joint angle travels from one threshold
//! zone to the other. Samples strictly between the thresholds put the
//! counter in the `Moving` state but do not erase which zone it last
//! occupied, so a slow curl through the middle band still completes a rep.
//! The `min_gap` debounce suppresses events closer than `min_gap` frames to
//! the previous recorded event.

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_DOWN_THRESH, DEFAULT_MIN_GAP, DEFAULT_UP_THRESH, MIN_GAP_SECONDS},
    utils::safe_cast::f64_to_usize,
    Error, Result,
};

/// Which transition completes a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepTrigger {
    /// Count when the limb re-extends past `down_thresh` after a curl
    #[default]
    Extension,
    /// Count when the limb curls past `up_thresh` after an extension
    Flexion,
}

/// Rep counter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepCounterConfig {
    /// Angle at or below which the limb is curled (degrees)
    pub up_thresh: f64,
    /// Angle at or above which the limb is extended (degrees)
    pub down_thresh: f64,
    /// Minimum frame distance between recorded events
    pub min_gap: usize,
    /// Transition that completes a repetition
    pub trigger: RepTrigger,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            up_thresh: DEFAULT_UP_THRESH,
            down_thresh: DEFAULT_DOWN_THRESH,
            min_gap: DEFAULT_MIN_GAP,
            trigger: RepTrigger::default(),
        }
    }
}

impl RepCounterConfig {
    /// Debounce window derived from the source frame rate
    ///
    /// # Errors
    ///
    /// Returns an error if `fps` is not a positive finite number
    pub fn min_gap_for_fps(fps: f64) -> Result<usize> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(Error::InvalidInput(format!("Frame rate must be positive, got {fps}")));
        }
        f64_to_usize((fps * MIN_GAP_SECONDS).floor())
    }

    /// Validate thresholds
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is not finite or the bands overlap
    pub fn validate(&self) -> Result<()> {
        if !self.up_thresh.is_finite() || !self.down_thresh.is_finite() {
            return Err(Error::ConfigError("Rep counter thresholds must be finite".to_string()));
        }
        if self.up_thresh >= self.down_thresh {
            return Err(Error::ConfigError(format!(
                "Rep counter up threshold {} must be below down threshold {}",
                self.up_thresh, self.down_thresh
            )));
        }
        Ok(())
    }
}

/// Observable counter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// No sample has reached either threshold since construction or reset
    Unknown,
    /// Between the thresholds, or no valid sample
    Moving,
    /// At or below `up_thresh`
    Up,
    /// At or above `down_thresh`
    Down,
}

/// Last threshold zone the counter occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Up,
    Down,
}

/// Counted repetitions and the frames that confirmed them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepSummary {
    pub count: usize,
    pub events: Vec<usize>,
}

/// Hysteresis state machine for one limb
#[derive(Debug, Clone)]
pub struct RepCounter {
    config: RepCounterConfig,
    state: CounterState,
    zone: Option<Zone>,
    last_event_frame: Option<usize>,
    count: usize,
    events: Vec<usize>,
}

impl RepCounter {
    /// Create a new counter
    #[must_use]
    pub const fn new(config: RepCounterConfig) -> Self {
        Self {
            config,
            state: CounterState::Unknown,
            zone: None,
            last_event_frame: None,
            count: 0,
            events: Vec::new(),
        }
    }

    /// Feed one sample; `frame` must increase between calls.
    ///
    /// Missing and NaN samples move the counter to `Moving`.
    /// Returns `true` if this sample completed a repetition.
    pub fn update(&mut self, frame: usize, sample: Option<f64>) -> bool {
        let Some(angle) = sample.filter(|a| !a.is_nan()) else {
            self.state = CounterState::Moving;
            return false;
        };

        if angle <= self.config.up_thresh {
            self.enter(frame, Zone::Up)
        } else if angle >= self.config.down_thresh {
            self.enter(frame, Zone::Down)
        } else {
            self.state = CounterState::Moving;
            false
        }
    }

    fn enter(&mut self, frame: usize, zone: Zone) -> bool {
        let from = match zone {
            Zone::Up => Zone::Down,
            Zone::Down => Zone::Up,
        };

        let mut counted = false;
        if self.zone == Some(from) && self.gap_elapsed(frame) {
            self.last_event_frame = Some(frame);

            let completes = match self.config.trigger {
                RepTrigger::Extension => zone == Zone::Down,
                RepTrigger::Flexion => zone == Zone::Up,
            };
            if completes {
                self.count += 1;
                self.events.push(frame);
                counted = true;
            }
        }

        self.zone = Some(zone);
        self.state = match zone {
            Zone::Up => CounterState::Up,
            Zone::Down => CounterState::Down,
        };
        counted
    }

    fn gap_elapsed(&self, frame: usize) -> bool {
        self.last_event_frame
            .map_or(true, |last| frame.saturating_sub(last) > self.config.min_gap)
    }

    /// Feed a whole gap-free series, frames numbered from zero
    pub fn process_series(&mut self, series: &[f64]) -> usize {
        let before = self.count;
        for (frame, &angle) in series.iter().enumerate() {
            self.update(frame, Some(angle));
        }
        self.count - before
    }

    /// Feed a series that may contain missing samples, frames numbered from zero
    pub fn process_samples(&mut self, samples: &[Option<f64>]) -> usize {
        let before = self.count;
        for (frame, &sample) in samples.iter().enumerate() {
            self.update(frame, sample);
        }
        self.count - before
    }

    /// Zero the count, clear events and forget every threshold crossing
    pub fn reset(&mut self) {
        self.state = CounterState::Unknown;
        self.zone = None;
        self.last_event_frame = None;
        self.count = 0;
        self.events.clear();
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn events(&self) -> &[usize] {
        &self.events
    }

    #[must_use]
    pub const fn state(&self) -> CounterState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &RepCounterConfig {
        &self.config
    }

    #[must_use]
    pub fn summary(&self) -> RepSummary {
        RepSummary {
            count: self.count,
            events: self.events.clone(),
        }
    }
}

/// Count repetitions over a complete series with a fresh counter
#[must_use]
pub fn count_reps(series: &[f64], config: &RepCounterConfig) -> RepSummary {
    let mut counter = RepCounter::new(config.clone());
    counter.process_series(series);
    counter.summary()
}
