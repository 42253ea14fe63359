//! Exercise identifiers and the rule set each one applies.

use std::fmt;
use std::str::FromStr;

use crate::{
    form_rules::{Measurement, RuleKind},
    Error,
};

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exercise {
    BicepCurl,
    TricepCurl,
    LateralRaise,
    PushUp,
}

impl Exercise {
    pub const ALL: [Self; 4] = [Self::BicepCurl, Self::TricepCurl, Self::LateralRaise, Self::PushUp];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BicepCurl => "bicep_curl",
            Self::TricepCurl => "tricep_curl",
            Self::LateralRaise => "lateral_raise",
            Self::PushUp => "push_up",
        }
    }

    /// Rules evaluated on every frame, in display order
    #[must_use]
    pub const fn rules(self) -> &'static [RuleKind] {
        match self {
            Self::BicepCurl => &[RuleKind::ElbowAngle, RuleKind::BackSymmetry],
            Self::TricepCurl => &[RuleKind::TricepExtension, RuleKind::BackSymmetry],
            Self::LateralRaise => &[RuleKind::WristShoulderAlignment, RuleKind::BackSymmetry],
            Self::PushUp => &[RuleKind::BackSymmetry],
        }
    }

    /// Angle-valued rule whose measurement drives rep counting, if any
    #[must_use]
    pub fn rep_angle_rule(self) -> Option<RuleKind> {
        self.rules()
            .iter()
            .copied()
            .find(|rule| rule.measurement() == Measurement::Angle && rule.requires_side())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|exercise| exercise.name() == normalized)
            .ok_or_else(|| Error::UnknownExercise(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise() {
        assert_eq!("bicep_curl".parse::<Exercise>().unwrap(), Exercise::BicepCurl);
        assert_eq!("Tricep-Curl".parse::<Exercise>().unwrap(), Exercise::TricepCurl);
        assert_eq!(" push_up ".parse::<Exercise>().unwrap(), Exercise::PushUp);
        assert!(matches!("deadlift".parse::<Exercise>(), Err(Error::UnknownExercise(_))));
    }

    #[test]
    fn test_rep_angle_rule() {
        assert_eq!(Exercise::BicepCurl.rep_angle_rule(), Some(RuleKind::ElbowAngle));
        assert_eq!(Exercise::TricepCurl.rep_angle_rule(), Some(RuleKind::TricepExtension));
        assert_eq!(Exercise::LateralRaise.rep_angle_rule(), None);
        assert_eq!(Exercise::PushUp.rep_angle_rule(), None);
    }

    #[test]
    fn test_every_exercise_checks_symmetry() {
        for exercise in Exercise::ALL {
            assert!(exercise.rules().contains(&RuleKind::BackSymmetry), "{exercise}");
        }
    }
}
