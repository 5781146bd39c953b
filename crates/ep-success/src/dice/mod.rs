//! Percentile dice: digits, rolls, and the two-d10 roller.
//!
//! A percentile roll is built from two independent ten-sided dice read as
//! digits (a face showing 10 counts as 0). The tens die and the units die
//! compose into a value in 0-99. Rolls whose digits match (00, 11, ... 99)
//! are critical.

pub mod roll;
pub mod source;

pub use roll::{Percentile, RollOutcome};
pub use source::{DigitSource, RngDigits, ScriptedDigits};

use serde::{Deserialize, Serialize};

use crate::error::{SuccessError, SuccessResult};

/// A single percentile die face read as a digit (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Digit(u8);

impl Digit {
    /// The digit 0.
    pub const ZERO: Self = Self(0);

    /// Read a d10 face (1-10) as a digit. A 10 counts as 0.
    pub fn from_face(face: u32) -> Self {
        Self((face % 10) as u8)
    }

    /// The digit's value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Digit {
    type Error = SuccessError;

    fn try_from(value: u32) -> SuccessResult<Self> {
        if value <= 9 {
            Ok(Self(value as u8))
        } else {
            Err(SuccessError::InvalidDigit(value))
        }
    }
}

impl From<Digit> for u32 {
    fn from(digit: Digit) -> Self {
        u32::from(digit.0)
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A percentile roll value in 0-99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PercentileRoll(u8);

impl PercentileRoll {
    /// The lowest roll, 00.
    pub const MIN: Self = Self(0);
    /// The highest roll, 99.
    pub const MAX: Self = Self(99);

    /// Compose a roll from its tens and units digits.
    pub fn from_digits(tens: Digit, units: Digit) -> Self {
        Self(tens.0 * 10 + units.0)
    }

    /// The roll's value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The tens digit. Single-digit rolls have a tens digit of 0.
    pub fn tens(self) -> Digit {
        Digit(self.0 / 10)
    }

    /// The units digit.
    pub fn units(self) -> Digit {
        Digit(self.0 % 10)
    }

    /// Every roll from 00 to 99 in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=99).map(Self)
    }
}

impl TryFrom<u32> for PercentileRoll {
    type Error = SuccessError;

    fn try_from(value: u32) -> SuccessResult<Self> {
        if value <= 99 {
            Ok(Self(value as u8))
        } else {
            Err(SuccessError::InvalidRoll(value))
        }
    }
}

impl From<PercentileRoll> for u32 {
    fn from(roll: PercentileRoll) -> Self {
        u32::from(roll.0)
    }
}

impl std::fmt::Display for PercentileRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// True if both digits of the roll match (00, 11, 22, ... 99).
pub fn is_critical_roll(roll: PercentileRoll) -> bool {
    roll.tens() == roll.units()
}

/// Swap the two digits of a roll: 23 becomes 32, and 5 (read as 05) becomes 50.
pub fn flip_flop(roll: PercentileRoll) -> PercentileRoll {
    PercentileRoll::from_digits(roll.units(), roll.tens())
}
