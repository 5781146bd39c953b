//! Success-test resolution engine for the Eclipse Phase ruleset.
//!
//! Provides the percentile roller, the eight-tier result classifier,
//! modifier aggregation, pool spending, and the configure-then-commit
//! success test with its immutable result record. Psi tests add a
//! range-dependent modifier on top. Rendering, storage and the character
//! model belong to the host, which talks to the engine through the
//! [`DigitSource`], [`HasPools`] and [`HasTestEffects`] traits.

pub mod config;
pub mod dice;
pub mod error;
pub mod modifier;
pub mod pool;
pub mod psi;
pub mod result;
pub mod success_test;

pub use config::RollConfig;
pub use dice::{
    Digit, DigitSource, Percentile, PercentileRoll, RngDigits, RollOutcome, ScriptedDigits,
    flip_flop, is_critical_roll,
};
pub use error::{SuccessError, SuccessResult};
pub use modifier::{
    HasTestEffects, ModifierId, ModifierIds, ModifierOrigin, ModifierSnapshot, Modifiers,
    SimpleModifier, SuccessTestEffect,
};
pub use pool::{HasPools, Pool, PoolAction, PoolResolution, PoolType, PostTestPoolAction};
pub use psi::{PsiPush, PsiTarget, PsiTest, RangeBand, Sleight};
pub use result::{ResultTier, SuperiorResultEffect, Target, classify, superior_effect_counts};
pub use success_test::{
    PostTestSpend, SuccessTest, SuccessTestRecord, TestChange, roll_success_test,
};
