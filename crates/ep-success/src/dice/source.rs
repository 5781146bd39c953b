//! Injectable random sources for percentile digits.

use std::collections::VecDeque;

use rand::Rng;

use super::{Digit, PercentileRoll};

/// Supplies independent digits 0-9, one per die.
///
/// The roller draws from this exactly twice per roll. Implement it to
/// replay recorded rolls or to pin results in tests.
pub trait DigitSource {
    /// Draw the next digit.
    fn next_digit(&mut self) -> Digit;
}

impl<S: DigitSource + ?Sized> DigitSource for &mut S {
    fn next_digit(&mut self) -> Digit {
        (**self).next_digit()
    }
}

/// Digits drawn from a `rand` generator by rolling a d10.
#[derive(Debug, Clone)]
pub struct RngDigits<R> {
    rng: R,
}

impl<R: Rng> RngDigits<R> {
    /// Wrap a random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DigitSource for RngDigits<R> {
    fn next_digit(&mut self) -> Digit {
        Digit::from_face(self.rng.random_range(1..=10))
    }
}

/// A fixed script of digits, replayed in order and then repeated.
///
/// An empty script yields zeros.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDigits {
    script: VecDeque<Digit>,
}

impl ScriptedDigits {
    /// Script the given digits.
    pub fn new(digits: impl IntoIterator<Item = Digit>) -> Self {
        Self {
            script: digits.into_iter().collect(),
        }
    }

    /// Script whole rolls, tens digit first.
    pub fn from_rolls(rolls: impl IntoIterator<Item = PercentileRoll>) -> Self {
        Self::new(rolls.into_iter().flat_map(|r| [r.tens(), r.units()]))
    }
}

impl DigitSource for ScriptedDigits {
    fn next_digit(&mut self) -> Digit {
        match self.script.pop_front() {
            Some(digit) => {
                self.script.push_back(digit);
                digit
            }
            None => Digit::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn digits(source: &mut impl DigitSource, n: usize) -> Vec<u8> {
        (0..n).map(|_| source.next_digit().value()).collect()
    }

    #[test]
    fn rng_digits_in_range() {
        let mut source = RngDigits::new(StdRng::seed_from_u64(42));
        for d in digits(&mut source, 500) {
            assert!(d <= 9);
        }
    }

    #[test]
    fn rng_digits_cover_all_faces() {
        let mut source = RngDigits::new(StdRng::seed_from_u64(7));
        let mut seen = [false; 10];
        for d in digits(&mut source, 1000) {
            seen[d as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn rng_digits_deterministic_with_seed() {
        let mut a = RngDigits::new(StdRng::seed_from_u64(99));
        let mut b = RngDigits::new(StdRng::seed_from_u64(99));
        assert_eq!(digits(&mut a, 20), digits(&mut b, 20));
    }

    #[test]
    fn scripted_replays_and_wraps() {
        let script = [3, 8].map(|d| Digit::try_from(d).unwrap());
        let mut source = ScriptedDigits::new(script);
        assert_eq!(digits(&mut source, 5), vec![3, 8, 3, 8, 3]);
    }

    #[test]
    fn scripted_from_rolls_splits_digits() {
        let rolls = [45, 7].map(|r| PercentileRoll::try_from(r).unwrap());
        let mut source = ScriptedDigits::from_rolls(rolls);
        assert_eq!(digits(&mut source, 4), vec![4, 5, 0, 7]);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut source = ScriptedDigits::default();
        assert_eq!(digits(&mut source, 3), vec![0, 0, 0]);
    }
}
