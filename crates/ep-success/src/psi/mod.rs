//! Psi tests: success tests whose target depends on range to the targets.
//!
//! A [`PsiTest`] wraps a [`SuccessTest`] and keeps one synthetic range
//! modifier in it. Any change to the targets, the touch flag, async
//! targeting or the chosen push recomputes that modifier.

pub mod range;

pub use range::{RangeBand, RangeThresholds};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dice::{DigitSource, Percentile};
use crate::error::{SuccessError, SuccessResult};
use crate::modifier::SimpleModifier;
use crate::success_test::{SuccessTest, SuccessTestRecord, TestChange};

/// Distance assumed when nothing is targeted.
pub const DEFAULT_TARGET_DISTANCE: u32 = 10;

/// Ways to push a sleight beyond its normal limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PsiPush {
    /// Affect one more target.
    ExtraTarget,
    /// Last longer. Not available for temporary sleights.
    IncreasedDuration,
    /// Stronger effect.
    IncreasedEffect,
    /// Better penetration.
    IncreasedPenetration,
    /// More power.
    IncreasedPower,
    /// Push the range thresholds out.
    IncreasedRange,
}

impl PsiPush {
    /// All pushes.
    pub fn all() -> &'static [Self] {
        &[
            Self::ExtraTarget,
            Self::IncreasedDuration,
            Self::IncreasedEffect,
            Self::IncreasedPenetration,
            Self::IncreasedPower,
            Self::IncreasedRange,
        ]
    }

    /// The stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ExtraTarget => "extra-target",
            Self::IncreasedDuration => "increased-duration",
            Self::IncreasedEffect => "increased-effect",
            Self::IncreasedPenetration => "increased-penetration",
            Self::IncreasedPower => "increased-power",
            Self::IncreasedRange => "increased-range",
        }
    }
}

impl std::str::FromStr for PsiPush {
    type Err = SuccessError;

    fn from_str(s: &str) -> SuccessResult<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| SuccessError::UnknownPush(s.to_string()))
    }
}

impl std::fmt::Display for PsiPush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtraTarget => write!(f, "Extra Target"),
            Self::IncreasedDuration => write!(f, "Increased Duration"),
            Self::IncreasedEffect => write!(f, "Increased Effect"),
            Self::IncreasedPenetration => write!(f, "Increased Penetration"),
            Self::IncreasedPower => write!(f, "Increased Power"),
            Self::IncreasedRange => write!(f, "Increased Range"),
        }
    }
}

/// The sleight being used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sleight {
    /// Sleight name.
    pub name: String,
    /// Lasts only a short time.
    pub temporary: bool,
}

impl Sleight {
    /// A sustained sleight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: false,
        }
    }

    /// A temporary sleight.
    pub fn temporary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: true,
        }
    }
}

/// Someone the sleight is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsiTarget {
    /// Display name.
    pub name: String,
    /// Distance from the user.
    pub distance: u32,
    /// The user is targeting themselves.
    pub is_self: bool,
}

impl PsiTarget {
    /// Another character at a distance.
    pub fn new(name: impl Into<String>, distance: u32) -> Self {
        Self {
            name: name.into(),
            distance,
            is_self: false,
        }
    }

    /// The user themselves.
    pub fn own_self(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distance: 0,
            is_self: true,
        }
    }
}

/// A success test for using a psi sleight.
#[derive(Debug, Clone)]
pub struct PsiTest {
    test: SuccessTest,
    sleight: Sleight,
    free_push: Option<PsiPush>,
    push: Option<PsiPush>,
    push_pools: u32,
    targets: Vec<PsiTarget>,
    target_distance: u32,
    targeting_async: bool,
    touch: bool,
    range_modifier: SimpleModifier,
    range_band: Option<RangeBand>,
}

impl PsiTest {
    /// Wrap a configured test. `free_push` is the push the character's
    /// psi grants without a pool spend.
    pub fn new(mut test: SuccessTest, sleight: Sleight, free_push: Option<PsiPush>) -> Self {
        let range_modifier = test.create_modifier(RangeBand::Close.to_string(), 0);
        let mut psi = Self {
            test,
            sleight,
            free_push,
            push: None,
            push_pools: 0,
            targets: Vec::new(),
            target_distance: DEFAULT_TARGET_DISTANCE,
            targeting_async: false,
            touch: false,
            range_modifier,
            range_band: None,
        };
        psi.recompute();
        psi
    }

    /// Aim at these targets. Extras beyond [`max_targets`](Self::max_targets)
    /// are dropped, here and whenever the limit later shrinks. The distance
    /// follows the farthest remaining target.
    pub fn set_targets(&mut self, targets: Vec<PsiTarget>) {
        self.targets = targets;
        self.recompute();
    }

    /// Set the distance directly, for targets the host cannot measure.
    /// Ignored while targets are set; their farthest distance wins.
    pub fn set_target_distance(&mut self, distance: u32) {
        self.target_distance = distance;
        self.recompute();
    }

    /// Switch touch range on or off.
    pub fn set_touch(&mut self, touch: bool) {
        self.touch = touch;
        self.recompute();
    }

    /// Switch asynchronous targeting on or off. Counts as a range boost.
    pub fn set_targeting_async(&mut self, targeting_async: bool) {
        self.targeting_async = targeting_async;
        self.recompute();
    }

    /// Choose or clear the push.
    pub fn set_push(&mut self, push: Option<PsiPush>) {
        self.push = push;
        self.recompute();
    }

    /// Pool points paid for the push. Ignored while no push is chosen.
    pub fn set_push_pools(&mut self, points: u32) {
        self.push_pools = points;
        self.recompute();
    }

    /// Swap the sleight.
    pub fn set_sleight(&mut self, sleight: Sleight) {
        self.sleight = sleight;
        self.recompute();
    }

    /// Apply a general test change.
    pub fn apply(&mut self, change: TestChange) {
        self.test.apply(change);
        self.recompute();
    }

    /// The wrapped test.
    pub fn test(&self) -> &SuccessTest {
        &self.test
    }

    /// The sleight in use.
    pub fn sleight(&self) -> &Sleight {
        &self.sleight
    }

    /// The chosen push.
    pub fn push(&self) -> Option<PsiPush> {
        self.push
    }

    /// The free push.
    pub fn free_push(&self) -> Option<PsiPush> {
        self.free_push
    }

    /// Pool points paid for the push.
    pub fn push_pools(&self) -> u32 {
        self.push_pools
    }

    /// Current targets.
    pub fn targets(&self) -> &[PsiTarget] {
        &self.targets
    }

    /// Distance used for the range band.
    pub fn target_distance(&self) -> u32 {
        self.target_distance
    }

    /// The current range band, or `None` when targeting self.
    pub fn range_band(&self) -> Option<RangeBand> {
        self.range_band
    }

    /// Whether one of the targets is the user.
    pub fn targeting_self(&self) -> bool {
        self.targets.iter().any(|t| t.is_self)
    }

    /// How many targets the sleight may affect.
    pub fn max_targets(&self) -> usize {
        let extra = [self.free_push, self.push]
            .iter()
            .filter(|p| **p == Some(PsiPush::ExtraTarget))
            .count();
        1 + extra
    }

    /// Pushes that can be chosen: everything but the free push, and
    /// extra target always.
    pub fn available_pushes(&self) -> Vec<PsiPush> {
        PsiPush::all()
            .iter()
            .copied()
            .filter(|p| *p == PsiPush::ExtraTarget || Some(*p) != self.free_push)
            .collect()
    }

    /// Number of active range boosts.
    pub fn range_boosts(&self) -> u32 {
        let increased_range = self.push.or(self.free_push) == Some(PsiPush::IncreasedRange);
        u32::from(self.targeting_async) + u32::from(increased_range)
    }

    /// Roll and freeze the result.
    pub fn commit<S: DigitSource>(self, roller: &mut Percentile<S>) -> SuccessTestRecord {
        self.test.commit(roller)
    }

    fn recompute(&mut self) {
        if self.sleight.temporary && self.push == Some(PsiPush::IncreasedDuration) {
            self.push = None;
        }
        if self.push.is_none() {
            self.push_pools = 0;
        }
        self.test.apply(TestChange::ReservePools(self.push_pools));

        let max = self.max_targets();
        self.targets.truncate(max);
        if let Some(farthest) = self.targets.iter().map(|t| t.distance).max() {
            self.target_distance = farthest;
        }

        self.range_band = if self.targeting_self() {
            None
        } else if self.touch {
            Some(RangeBand::Touch)
        } else {
            let thresholds = RangeThresholds::with_boosts(self.range_boosts());
            Some(RangeBand::for_distance(self.target_distance, thresholds))
        };

        match self.range_band {
            Some(band) => {
                self.range_modifier.name = band.to_string();
                self.range_modifier.value = band.modifier();
                self.test.apply(TestChange::SetSimple(self.range_modifier.clone()));
            }
            None => self.test.apply(TestChange::RemoveSimple(self.range_modifier.id)),
        }

        trace!(
            distance = self.target_distance,
            band = ?self.range_band,
            boosts = self.range_boosts(),
            target = %self.test.target(),
            "psi range recomputed"
        );
    }
}
