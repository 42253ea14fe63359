//! Session pipeline: per-frame rule evaluation, live rep counting and the
//! post-hoc smoothed report.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    exercise::Exercise,
    filters::{smooth_series, SeriesSmoother, SmoothOutcome},
    form_rules::{RuleThresholds, RuleVerdict},
    landmarks::{LandmarkFrame, Side},
    rep_counter::{count_reps, RepCounter, RepCounterConfig, RepSummary},
    utils::finite_mean,
    Result,
};

/// A value tracked separately for each limb
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSide<T> {
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            left: f(Side::Left),
            right: f(Side::Right),
        }
    }

    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Everything observed on one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub frame: usize,
    pub pose_detected: bool,
    /// Verdicts of every rule that could be evaluated, in rule order
    pub verdicts: Vec<RuleVerdict>,
    /// Rep-driving joint angle per side, `None` when unavailable
    pub angles: PerSide<Option<f64>>,
    /// Live rep totals after this frame
    pub live_reps: PerSide<usize>,
    /// Sides whose live counter completed a rep on this frame
    pub completed: PerSide<bool>,
}

/// Post-hoc analysis of one limb
#[derive(Debug, Clone, PartialEq)]
pub struct LimbReport {
    pub side: Side,
    pub raw: Vec<Option<f64>>,
    pub smoothed: SmoothOutcome,
    pub reps: RepSummary,
    /// Mean of the resolved series, `None` if no sample was ever valid
    pub mean_angle: Option<f64>,
}

/// Post-hoc analysis of a whole session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub exercise: Exercise,
    pub frames: usize,
    pub limbs: PerSide<LimbReport>,
}

/// Flat session statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub exercise: String,
    pub frames: usize,
    pub reps_left: usize,
    pub reps_right: usize,
    pub left_mean_angle: Option<f64>,
    pub right_mean_angle: Option<f64>,
    pub left_events: Vec<usize>,
    pub right_events: Vec<usize>,
}

impl SessionReport {
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            exercise: self.exercise.to_string(),
            frames: self.frames,
            reps_left: self.limbs.left.reps.count,
            reps_right: self.limbs.right.reps.count,
            left_mean_angle: self.limbs.left.mean_angle,
            right_mean_angle: self.limbs.right.mean_angle,
            left_events: self.limbs.left.reps.events.clone(),
            right_events: self.limbs.right.reps.events.clone(),
        }
    }
}

/// Accumulates frames for one exercise session
pub struct SessionAnalyzer {
    exercise: Exercise,
    thresholds: RuleThresholds,
    counter_config: RepCounterConfig,
    smoother: Box<dyn SeriesSmoother>,
    angles: PerSide<Vec<Option<f64>>>,
    live: PerSide<RepCounter>,
    frame_count: usize,
}

impl SessionAnalyzer {
    /// Create a new session analyzer
    #[must_use]
    pub fn new(
        exercise: Exercise,
        thresholds: RuleThresholds,
        counter_config: RepCounterConfig,
        smoother: Box<dyn SeriesSmoother>,
    ) -> Self {
        info!(
            "Starting {} session with {} smoothing (up {}°, down {}°, gap {} frames)",
            exercise,
            smoother.name(),
            counter_config.up_thresh,
            counter_config.down_thresh,
            counter_config.min_gap
        );
        if exercise.rep_angle_rule().is_none() {
            info!("{} has no angle rule, rep counting disabled", exercise);
        }

        Self {
            exercise,
            thresholds,
            live: PerSide::from_fn(|_| RepCounter::new(counter_config.clone())),
            counter_config,
            smoother,
            angles: PerSide::default(),
            frame_count: 0,
        }
    }

    /// Create an analyzer from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration names an unknown exercise or
    /// smoother, or carries invalid thresholds
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.exercise()?,
            config.rules.clone(),
            config.counter_config()?,
            config.create_smoother()?,
        ))
    }

    #[must_use]
    pub const fn exercise(&self) -> Exercise {
        self.exercise
    }

    #[must_use]
    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Live rep counter for one side
    #[must_use]
    pub const fn live_counter(&self, side: Side) -> &RepCounter {
        self.live.get(side)
    }

    /// Evaluate one frame; `None` means no pose was detected
    pub fn process_frame(&mut self, landmarks: Option<&LandmarkFrame>) -> FrameRecord {
        let frame = self.frame_count;
        self.frame_count += 1;

        let rep_rule = self.exercise.rep_angle_rule();
        let mut verdicts = Vec::new();
        let mut angles = PerSide::<Option<f64>>::default();

        if let Some(landmarks) = landmarks {
            for &rule in self.exercise.rules() {
                for result in rule.evaluate_all(landmarks, &self.thresholds) {
                    match result {
                        Ok(verdict) => {
                            if let (Some(side), true) = (verdict.side, Some(rule) == rep_rule) {
                                *angles.get_mut(side) = Some(verdict.value);
                            }
                            verdicts.push(verdict);
                        }
                        Err(e) => debug!("Frame {}: {} not evaluated: {}", frame, rule.name(), e),
                    }
                }
            }
        } else {
            debug!("Frame {}: no pose detected", frame);
        }

        let mut completed = PerSide::<bool>::default();
        for side in Side::BOTH {
            let angle = *angles.get(side);
            self.angles.get_mut(side).push(angle);
            if self.live.get_mut(side).update(frame, angle) {
                *completed.get_mut(side) = true;
                info!("Frame {}: {} rep {}", frame, side, self.live.get(side).count());
            }
        }

        FrameRecord {
            frame,
            pose_detected: landmarks.is_some(),
            verdicts,
            angles,
            live_reps: PerSide::from_fn(|side| self.live.get(side).count()),
            completed,
        }
    }

    /// Reset the live counters; recorded angles are kept
    pub fn reset_reps(&mut self) {
        for side in Side::BOTH {
            self.live.get_mut(side).reset();
        }
        info!("Reps have been reset");
    }

    /// Smooth both angle series and count reps over them
    #[must_use]
    pub fn finish(&self) -> SessionReport {
        let limbs = PerSide::from_fn(|side| self.limb_report(side));
        info!(
            "Session {}: {} frames, {} left reps, {} right reps",
            self.exercise, self.frame_count, limbs.left.reps.count, limbs.right.reps.count
        );

        SessionReport {
            exercise: self.exercise,
            frames: self.frame_count,
            limbs,
        }
    }

    fn limb_report(&self, side: Side) -> LimbReport {
        let raw = self.angles.get(side).clone();
        let smoothed = smooth_series(&raw, self.smoother.as_ref());

        let (reps, mean_angle) = match smoothed.values() {
            Some(series) => (count_reps(series, &self.counter_config), finite_mean(series)),
            None => (RepSummary::default(), None),
        };

        LimbReport {
            side,
            raw,
            smoothed,
            reps,
            mean_angle,
        }
    }
}
