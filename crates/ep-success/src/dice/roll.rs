//! The percentile roller and its outcome.

use serde::{Deserialize, Serialize};

use super::{Digit, DigitSource, PercentileRoll, flip_flop, is_critical_roll};

/// The two digits of a percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The tens die.
    pub tens: Digit,
    /// The units die.
    pub units: Digit,
}

impl RollOutcome {
    /// The composed 0-99 roll.
    pub fn roll(&self) -> PercentileRoll {
        PercentileRoll::from_digits(self.tens, self.units)
    }

    /// True if both digits match.
    pub fn is_critical(&self) -> bool {
        is_critical_roll(self.roll())
    }

    /// The same dice read the other way round.
    pub fn flip_flopped(&self) -> Self {
        let flipped = flip_flop(self.roll());
        Self {
            tens: flipped.tens(),
            units: flipped.units(),
        }
    }
}

impl From<PercentileRoll> for RollOutcome {
    fn from(roll: PercentileRoll) -> Self {
        Self {
            tens: roll.tens(),
            units: roll.units(),
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.roll())
    }
}

/// Rolls two d10s as a percentile.
#[derive(Debug, Clone)]
pub struct Percentile<S> {
    source: S,
}

impl<S: DigitSource> Percentile<S> {
    /// Create a roller over the given digit source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Roll tens then units. Draws exactly two digits from the source.
    pub fn roll(&mut self) -> RollOutcome {
        let tens = self.source.next_digit();
        let units = self.source.next_digit();
        RollOutcome { tens, units }
    }

    /// Give back the digit source.
    pub fn into_source(self) -> S {
        self.source
    }
}
