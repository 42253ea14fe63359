//! Per-frame form rules.
//!
//! Every rule is a pure function of one landmark frame: it returns a verdict,
//! a human readable message and the scalar it measured. Temporal logic lives
//! in [`crate::rep_counter`].

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_ALIGNMENT_TOLERANCE, DEFAULT_ELBOW_BOTTOM_THRESH, DEFAULT_ELBOW_TOP_THRESH, DEFAULT_EXTENSION_THRESH,
        DEFAULT_SYMMETRY_TOLERANCE,
    },
    geometry::{angle_at, vertical_offset},
    landmarks::{Landmark, LandmarkFrame, Side},
    Error, Result,
};

/// Domain of the scalar a rule reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Joint angle in degrees, usable as rep counter input
    Angle,
    /// Coordinate offset, never a rep counter input
    Offset,
}

/// Position of the forearm during a curl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElbowPhase {
    Top,
    Bottom,
    Incomplete,
}

/// Rule thresholds, all overridable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Elbow angle at or below which a curl is at the top (degrees)
    pub elbow_top: f64,
    /// Elbow angle at or above which a curl is at the bottom (degrees)
    pub elbow_bottom: f64,
    /// Elbow angle above which an arm counts as extended (degrees)
    pub extension: f64,
    /// Maximum wrist/shoulder vertical offset
    pub alignment_tolerance: f64,
    /// Maximum left/right shoulder vertical offset
    pub symmetry_tolerance: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            elbow_top: DEFAULT_ELBOW_TOP_THRESH,
            elbow_bottom: DEFAULT_ELBOW_BOTTOM_THRESH,
            extension: DEFAULT_EXTENSION_THRESH,
            alignment_tolerance: DEFAULT_ALIGNMENT_TOLERANCE,
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
        }
    }
}

/// Outcome of evaluating one rule on one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RuleVerdict {
    pub rule: RuleKind,
    /// Limb the rule was evaluated for, `None` for whole-body rules
    pub side: Option<Side>,
    pub ok: bool,
    pub message: String,
    /// Measured angle or offset, see [`RuleVerdict::measurement`]
    pub value: f64,
}

impl RuleVerdict {
    #[must_use]
    pub const fn measurement(&self) -> Measurement {
        self.rule.measurement()
    }
}

/// Rule descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Bicep curl elbow angle, three-way top/bottom/incomplete
    ElbowAngle,
    /// Tricep extension elbow angle
    TricepExtension,
    /// Wrist held level with the shoulder
    WristShoulderAlignment,
    /// Shoulders held level
    BackSymmetry,
}

impl RuleKind {
    /// Whether the rule is evaluated once per limb
    #[must_use]
    pub const fn requires_side(self) -> bool {
        !matches!(self, Self::BackSymmetry)
    }

    #[must_use]
    pub const fn measurement(self) -> Measurement {
        match self {
            Self::ElbowAngle | Self::TricepExtension => Measurement::Angle,
            Self::WristShoulderAlignment | Self::BackSymmetry => Measurement::Offset,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElbowAngle => "elbow_angle",
            Self::TricepExtension => "tricep_extension",
            Self::WristShoulderAlignment => "wrist_shoulder_alignment",
            Self::BackSymmetry => "back_symmetry",
        }
    }

    /// Evaluate the rule for one side, or for the whole body when `side` is `None`
    ///
    /// # Errors
    ///
    /// Returns an error if a sided rule is given no side, or if the frame
    /// lacks a landmark the rule needs
    pub fn evaluate(self, frame: &LandmarkFrame, side: Option<Side>, thresholds: &RuleThresholds) -> Result<RuleVerdict> {
        let sided = || side.ok_or_else(|| Error::InvalidInput(format!("Rule {} requires a side", self.name())));
        match self {
            Self::ElbowAngle => elbow_angle(frame, sided()?, thresholds.elbow_top, thresholds.elbow_bottom),
            Self::TricepExtension => tricep_extension(frame, sided()?, thresholds.extension),
            Self::WristShoulderAlignment => wrist_shoulder_alignment(frame, sided()?, thresholds.alignment_tolerance),
            Self::BackSymmetry => back_symmetry(frame, thresholds.symmetry_tolerance),
        }
    }

    /// Evaluate the rule for both limbs if it is sided, once otherwise
    #[must_use]
    pub fn evaluate_all(self, frame: &LandmarkFrame, thresholds: &RuleThresholds) -> Vec<Result<RuleVerdict>> {
        if self.requires_side() {
            Side::BOTH
                .iter()
                .map(|&side| self.evaluate(frame, Some(side), thresholds))
                .collect()
        } else {
            vec![self.evaluate(frame, None, thresholds)]
        }
    }
}

/// Classify an elbow angle; both boundaries are inclusive
#[must_use]
pub fn classify_elbow(angle: f64, top_thresh: f64, bottom_thresh: f64) -> ElbowPhase {
    if angle <= top_thresh {
        ElbowPhase::Top
    } else if angle >= bottom_thresh {
        ElbowPhase::Bottom
    } else {
        ElbowPhase::Incomplete
    }
}

fn arm_angle(frame: &LandmarkFrame, side: Side) -> Result<f64> {
    let shoulder = frame.require(side.shoulder())?;
    let elbow = frame.require(side.elbow())?;
    let wrist = frame.require(side.wrist())?;
    Ok(angle_at(shoulder, elbow, wrist))
}

/// Bicep curl elbow angle rule
///
/// # Errors
///
/// Returns `Error::MissingLandmark` if the arm is not fully visible
pub fn elbow_angle(frame: &LandmarkFrame, side: Side, top_thresh: f64, bottom_thresh: f64) -> Result<RuleVerdict> {
    let angle = arm_angle(frame, side)?;
    let degrees = angle.trunc();

    let (ok, message) = match classify_elbow(angle, top_thresh, bottom_thresh) {
        ElbowPhase::Top => (true, format!("{side} elbow: good top ({degrees:.0}°)")),
        ElbowPhase::Bottom => (true, format!("{side} elbow: good bottom ({degrees:.0}°)")),
        ElbowPhase::Incomplete => (false, format!("{side} elbow: incomplete curl ({degrees:.0}°)")),
    };

    Ok(RuleVerdict {
        rule: RuleKind::ElbowAngle,
        side: Some(side),
        ok,
        message,
        value: angle,
    })
}

/// Tricep extension rule, passes strictly above `extension_thresh`
///
/// # Errors
///
/// Returns `Error::MissingLandmark` if the arm is not fully visible
pub fn tricep_extension(frame: &LandmarkFrame, side: Side, extension_thresh: f64) -> Result<RuleVerdict> {
    let angle = arm_angle(frame, side)?;
    let ok = angle > extension_thresh;

    let message = if ok {
        format!("Good extension ({:.0}°)", angle.trunc())
    } else {
        format!(
            "Extend your {side} arm more ({:.0}°, {:.0}° short)",
            angle.trunc(),
            (extension_thresh - angle).round().max(1.0)
        )
    };

    Ok(RuleVerdict {
        rule: RuleKind::TricepExtension,
        side: Some(side),
        ok,
        message,
        value: angle,
    })
}

/// Wrist/shoulder vertical alignment rule
///
/// # Errors
///
/// Returns `Error::MissingLandmark` if the shoulder or wrist is not visible
pub fn wrist_shoulder_alignment(frame: &LandmarkFrame, side: Side, tolerance: f64) -> Result<RuleVerdict> {
    let shoulder = frame.require(side.shoulder())?;
    let wrist = frame.require(side.wrist())?;

    let dy = vertical_offset(shoulder, wrist);
    let ok = dy <= tolerance;
    let status = if ok { "Aligned" } else { "Not aligned" };

    Ok(RuleVerdict {
        rule: RuleKind::WristShoulderAlignment,
        side: Some(side),
        ok,
        message: format!("{status} ({side} wrist-shoulder dy={dy:.0})"),
        value: dy,
    })
}

/// Shoulder level rule
///
/// # Errors
///
/// Returns `Error::MissingLandmark` if either shoulder is not visible
pub fn back_symmetry(frame: &LandmarkFrame, tolerance: f64) -> Result<RuleVerdict> {
    let left = frame.require(Landmark::LeftShoulder)?;
    let right = frame.require(Landmark::RightShoulder)?;

    let dy = vertical_offset(left, right);
    let ok = dy <= tolerance;
    let status = if ok { "Symmetric" } else { "Tilted" };

    Ok(RuleVerdict {
        rule: RuleKind::BackSymmetry,
        side: None,
        ok,
        message: format!("{status} (shoulder dy={dy:.0})"),
        value: dy,
    })
}
