//! Pools: capped, spendable counters a character commits to tests.
//!
//! The engine never writes pool data back. It shows what a test *would*
//! spend by adjusting snapshot copies; persisting the spend is the host's
//! job once the test is committed.

pub mod resolution;

pub use resolution::PoolResolution;

use serde::{Deserialize, Serialize};

use crate::error::{SuccessError, SuccessResult};

/// Target number bonus bought with a pre-test [`PoolAction::Bonus`].
pub const POOL_BONUS: i32 = 20;

/// The kinds of pool a character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolType {
    /// Cognitive and technical tests.
    Insight,
    /// Social and willpower tests.
    Moxie,
    /// Physical tests.
    Vigor,
    /// Threat pool for non-player opponents.
    Threat,
    /// Usable for any test.
    Flex,
}

impl PoolType {
    /// All pool types.
    pub fn all() -> &'static [Self] {
        &[
            Self::Insight,
            Self::Moxie,
            Self::Vigor,
            Self::Threat,
            Self::Flex,
        ]
    }

    /// The stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Insight => "insight",
            Self::Moxie => "moxie",
            Self::Vigor => "vigor",
            Self::Threat => "threat",
            Self::Flex => "flex",
        }
    }

    /// Flex is exempt from reservations made by other spends.
    pub fn is_flexible(self) -> bool {
        self == Self::Flex
    }
}

impl std::str::FromStr for PoolType {
    type Err = SuccessError;

    fn from_str(s: &str) -> SuccessResult<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SuccessError::UnknownPoolType(s.to_string()))
    }
}

impl std::fmt::Display for PoolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insight => write!(f, "Insight"),
            Self::Moxie => write!(f, "Moxie"),
            Self::Vigor => write!(f, "Vigor"),
            Self::Threat => write!(f, "Threat"),
            Self::Flex => write!(f, "Flex"),
        }
    }
}

/// A pool with a cap and how much of it is spent. `spent` never exceeds `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPool")]
pub struct Pool {
    pool_type: PoolType,
    max: u32,
    spent: u32,
}

#[derive(Deserialize)]
struct RawPool {
    pool_type: PoolType,
    max: u32,
    spent: u32,
}

impl From<RawPool> for Pool {
    fn from(raw: RawPool) -> Self {
        Self::with_spent(raw.pool_type, raw.max, raw.spent)
    }
}

impl Pool {
    /// A full pool.
    pub fn new(pool_type: PoolType, max: u32) -> Self {
        Self {
            pool_type,
            max,
            spent: 0,
        }
    }

    /// A partly spent pool. Spend beyond `max` is clamped.
    pub fn with_spent(pool_type: PoolType, max: u32, spent: u32) -> Self {
        Self {
            pool_type,
            max,
            spent: spent.min(max),
        }
    }

    /// The pool's type.
    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }

    /// The cap.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Points spent so far.
    pub fn spent(&self) -> u32 {
        self.spent
    }

    /// Points left to spend.
    pub fn available(&self) -> u32 {
        self.max - self.spent
    }

    /// True when nothing is left.
    pub fn is_exhausted(&self) -> bool {
        self.spent >= self.max
    }

    /// Spend up to `amount`, clamped to what is left. Returns the amount
    /// actually spent.
    pub fn spend(&mut self, amount: u32) -> u32 {
        let spent = amount.min(self.available());
        self.spent += spent;
        spent
    }

    /// A copy of this pool with `amount` more spent (clamped).
    pub fn after_spending(&self, amount: u32) -> Self {
        let mut next = *self;
        next.spend(amount);
        next
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.pool_type, self.available(), self.max)
    }
}

/// What a pool point buys before the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolAction {
    /// +20 to the target number.
    Bonus,
    /// Negative modifiers do not count.
    IgnoreMods,
    /// Improve the result one step once rolled.
    Improve,
}

impl PoolAction {
    /// All pre-test actions.
    pub fn all() -> &'static [Self] {
        &[Self::Bonus, Self::IgnoreMods, Self::Improve]
    }

    /// The stable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bonus => "bonus",
            Self::IgnoreMods => "ignore-mods",
            Self::Improve => "improve",
        }
    }
}

impl std::str::FromStr for PoolAction {
    type Err = SuccessError;

    fn from_str(s: &str) -> SuccessResult<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| SuccessError::UnknownPoolAction(s.to_string()))
    }
}

impl std::fmt::Display for PoolAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bonus => write!(f, "+{POOL_BONUS} Bonus"),
            Self::IgnoreMods => write!(f, "Ignore Modifiers"),
            Self::Improve => write!(f, "Improve Result"),
        }
    }
}

/// What a pool point buys after the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostTestPoolAction {
    /// Read the dice the other way round.
    FlipFlop,
    /// Improve the result one step.
    Improve,
}

impl std::fmt::Display for PostTestPoolAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlipFlop => write!(f, "Flip-Flop"),
            Self::Improve => write!(f, "Improve Result"),
        }
    }
}

/// Anything that can report a character's pools.
pub trait HasPools {
    /// Current pools with their persisted spend.
    fn pools(&self) -> Vec<Pool>;
}

impl HasPools for Vec<Pool> {
    fn pools(&self) -> Vec<Pool> {
        self.clone()
    }
}
