//! Result tiers and the percentile classifier.
//!
//! A roll at or below the target succeeds. How far the roll climbs decides
//! whether the result is superior: high successful rolls are better, low
//! failed rolls are worse. Doubles are criticals, except that a defaulting
//! character cannot roll a critical success.

pub mod superior;

pub use superior::{SuperiorResultEffect, superior_effect_counts};

use serde::{Deserialize, Serialize};

use crate::dice::{PercentileRoll, is_critical_roll};
use crate::error::{SuccessError, SuccessResult};

/// Rolls at or above this on a success are superior.
const SUPERIOR_SUCCESS_MIN: u8 = 33;
/// Rolls at or above this on a success are doubly superior.
const SUPERIOR_SUCCESS_X2_MIN: u8 = 66;
/// Rolls at or below this on a failure are doubly superior.
const SUPERIOR_FAILURE_X2_MAX: u8 = 33;
/// Rolls at or below this on a failure are superior.
const SUPERIOR_FAILURE_MAX: u8 = 66;

/// The number a roll must not exceed, always within 0-99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct Target(u8);

impl Target {
    /// Clamp any rating-plus-modifiers sum into 0-99.
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, 99) as u8)
    }

    /// The target's value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<i32> for Target {
    fn from(value: i32) -> Self {
        Self::clamped(value)
    }
}

impl From<Target> for i32 {
    fn from(target: Target) -> Self {
        i32::from(target.0)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The eight outcomes of a success test, worst first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultTier {
    /// Failed on doubles, or rolled 99.
    CriticalFailure,
    /// Failed with a roll of 33 or less.
    SuperiorFailureX2,
    /// Failed with a roll of 66 or less.
    SuperiorFailure,
    /// Failed with a high roll.
    Failure,
    /// Succeeded with a roll below 33.
    Success,
    /// Succeeded with a roll of 33 or more.
    SuperiorSuccess,
    /// Succeeded with a roll of 66 or more.
    SuperiorSuccessX2,
    /// Succeeded on doubles, or rolled 00.
    CriticalSuccess,
}

impl ResultTier {
    /// All tiers in ascending order.
    pub fn all() -> &'static [Self] {
        &[
            Self::CriticalFailure,
            Self::SuperiorFailureX2,
            Self::SuperiorFailure,
            Self::Failure,
            Self::Success,
            Self::SuperiorSuccess,
            Self::SuperiorSuccessX2,
            Self::CriticalSuccess,
        ]
    }

    /// The stable camelCase name used for storage.
    pub fn name(self) -> &'static str {
        match self {
            Self::CriticalFailure => "criticalFailure",
            Self::SuperiorFailureX2 => "superiorFailureX2",
            Self::SuperiorFailure => "superiorFailure",
            Self::Failure => "failure",
            Self::Success => "success",
            Self::SuperiorSuccess => "superiorSuccess",
            Self::SuperiorSuccessX2 => "superiorSuccessX2",
            Self::CriticalSuccess => "criticalSuccess",
        }
    }

    /// True for Success and every tier above it.
    pub fn is_successful(self) -> bool {
        self >= Self::Success
    }

    /// Raise the result one step, as a pool spend allows.
    ///
    /// Only Success, SuperiorSuccess and CriticalFailure move. Every other
    /// tier is returned unchanged.
    pub fn improve_one_step(self) -> Self {
        match self {
            Self::SuperiorSuccess => Self::SuperiorSuccessX2,
            Self::Success => Self::SuperiorSuccess,
            Self::CriticalFailure => Self::Failure,
            other => other,
        }
    }

    /// How many superior result effects this tier grants (0, 1 or 2).
    pub fn granted_superior_effect_count(self) -> u8 {
        match self {
            Self::SuperiorSuccessX2 | Self::SuperiorFailureX2 => 2,
            Self::SuperiorSuccess | Self::SuperiorFailure => 1,
            _ => 0,
        }
    }
}

impl std::str::FromStr for ResultTier {
    type Err = SuccessError;

    fn from_str(s: &str) -> SuccessResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|tier| tier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SuccessError::UnknownTier(s.to_string()))
    }
}

impl std::fmt::Display for ResultTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CriticalFailure => write!(f, "Critical Failure"),
            Self::SuperiorFailureX2 => write!(f, "Superior Failure x2"),
            Self::SuperiorFailure => write!(f, "Superior Failure"),
            Self::Failure => write!(f, "Failure"),
            Self::Success => write!(f, "Success"),
            Self::SuperiorSuccess => write!(f, "Superior Success"),
            Self::SuperiorSuccessX2 => write!(f, "Superior Success x2"),
            Self::CriticalSuccess => write!(f, "Critical Success"),
        }
    }
}

/// Classify a roll against a target.
///
/// 00 is a critical success unless defaulting, 99 is always a critical
/// failure. Otherwise doubles are criticals on either side, but a
/// defaulting success on doubles drops to the ordinary success tiers while
/// a defaulting failure on doubles stays critical.
pub fn classify(roll: PercentileRoll, target: Target, defaulting: bool) -> ResultTier {
    let value = roll.value();
    if value == 0 && !defaulting {
        return ResultTier::CriticalSuccess;
    }
    if roll == PercentileRoll::MAX {
        return ResultTier::CriticalFailure;
    }

    let critical = is_critical_roll(roll);

    if value <= target.value() {
        if critical && !defaulting {
            ResultTier::CriticalSuccess
        } else if value >= SUPERIOR_SUCCESS_X2_MIN {
            ResultTier::SuperiorSuccessX2
        } else if value >= SUPERIOR_SUCCESS_MIN {
            ResultTier::SuperiorSuccess
        } else {
            ResultTier::Success
        }
    } else if critical {
        ResultTier::CriticalFailure
    } else if value <= SUPERIOR_FAILURE_X2_MAX {
        ResultTier::SuperiorFailureX2
    } else if value <= SUPERIOR_FAILURE_MAX {
        ResultTier::SuperiorFailure
    } else {
        ResultTier::Failure
    }
}
