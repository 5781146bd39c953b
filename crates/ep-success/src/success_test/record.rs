//! The frozen outcome of a committed success test.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::RollOutcome;
use crate::modifier::ModifierSnapshot;
use crate::pool::{Pool, PoolAction, PostTestPoolAction};
use crate::result::{ResultTier, Target, classify};

/// Everything the host needs to display and store a rolled test.
///
/// Built once at commit. Post-test pool spends produce a new record and
/// leave this one untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTestRecord {
    roll: RollOutcome,
    target: Target,
    result: ResultTier,
    defaulting: bool,
    modifiers_applied: Vec<ModifierSnapshot>,
    pool_used: Option<Pool>,
    pool_action: Option<PoolAction>,
    post_test: Option<PostTestPoolAction>,
}

/// The outcome of offering a pool point after the roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTestSpend {
    /// The resulting record. Unchanged if the spend was refused.
    pub record: SuccessTestRecord,
    /// The pool after paying. Unchanged if the spend was refused.
    pub pool: Pool,
    /// Whether the spend went through.
    pub applied: bool,
}

impl SuccessTestRecord {
    pub(crate) fn new(
        roll: RollOutcome,
        target: Target,
        result: ResultTier,
        defaulting: bool,
        modifiers_applied: Vec<ModifierSnapshot>,
        pool: Option<(Pool, PoolAction)>,
    ) -> Self {
        Self {
            roll,
            target,
            result,
            defaulting,
            modifiers_applied,
            pool_used: pool.map(|(pool, _)| pool),
            pool_action: pool.map(|(_, action)| action),
            post_test: None,
        }
    }

    /// The dice.
    pub fn roll(&self) -> RollOutcome {
        self.roll
    }

    /// The effective target the roll was compared against.
    pub fn target(&self) -> Target {
        self.target
    }

    /// The final tier, after any pool improvements.
    pub fn result(&self) -> ResultTier {
        self.result
    }

    /// Whether the final tier is a success.
    pub fn is_success(&self) -> bool {
        self.result.is_successful()
    }

    /// Whether the character was defaulting.
    pub fn is_defaulting(&self) -> bool {
        self.defaulting
    }

    /// Modifiers as they stood at commit.
    pub fn modifiers_applied(&self) -> &[ModifierSnapshot] {
        &self.modifiers_applied
    }

    /// The pool spent before the roll, after paying.
    pub fn pool_used(&self) -> Option<Pool> {
        self.pool_used
    }

    /// What the pre-roll pool point bought.
    pub fn pool_action(&self) -> Option<PoolAction> {
        self.pool_action
    }

    /// The post-test pool action taken, if any.
    pub fn post_test_action(&self) -> Option<PostTestPoolAction> {
        self.post_test
    }

    /// How many superior result effects the final tier grants.
    pub fn superior_effects_allowed(&self) -> u8 {
        self.result.granted_superior_effect_count()
    }

    /// Spend a pool point after the roll.
    ///
    /// Refused when the pool is empty or a post-test action was already
    /// taken. A flip-flop rereads the dice against the same target and
    /// keeps any pre-roll improvement.
    pub fn spend_post_test(self, pool: Pool, action: PostTestPoolAction) -> PostTestSpend {
        if pool.is_exhausted() || self.post_test.is_some() {
            return PostTestSpend {
                record: self,
                pool,
                applied: false,
            };
        }

        let mut next = self.clone();
        next.post_test = Some(action);
        match action {
            PostTestPoolAction::FlipFlop => {
                next.roll = self.roll.flip_flopped();
                let rolled = classify(next.roll.roll(), self.target, self.defaulting);
                next.result = match self.pool_action {
                    Some(PoolAction::Improve) => rolled.improve_one_step(),
                    _ => rolled,
                };
            }
            PostTestPoolAction::Improve => {
                next.result = self.result.improve_one_step();
            }
        }

        debug!(
            action = %action,
            pool = %pool.pool_type(),
            from = %self.result,
            to = %next.result,
            "post-test pool spend"
        );

        PostTestSpend {
            record: next,
            pool: pool.after_spending(1),
            applied: true,
        }
    }
}
