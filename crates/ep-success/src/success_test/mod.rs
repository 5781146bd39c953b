//! The success test: configure, then commit once.
//!
//! A [`SuccessTest`] is the configuring state. Every change recomputes the
//! target number on the spot, so [`SuccessTest::target`] always reflects the
//! latest state. [`SuccessTest::commit`] consumes the test, rolls once, and
//! returns the immutable [`SuccessTestRecord`]. A test that is dropped
//! without committing has no effect.

pub mod record;

pub use record::{PostTestSpend, SuccessTestRecord};

use tracing::{debug, trace};

use crate::dice::{DigitSource, Percentile};
use crate::modifier::{
    HasTestEffects, ModifierId, ModifierIds, ModifierOrigin, ModifierSnapshot, Modifiers,
    SimpleModifier, SuccessTestEffect,
};
use crate::pool::{HasPools, POOL_BONUS, Pool, PoolAction, PoolResolution, PoolType};
use crate::result::{Target, classify};

/// One change to a configuring test.
#[derive(Debug, Clone, PartialEq)]
pub enum TestChange {
    /// Replace the base skill or attribute rating.
    SetRating(i32),
    /// Switch defaulting on or off.
    SetDefaulting(bool),
    /// Upsert a simple modifier by id.
    SetSimple(SimpleModifier),
    /// Remove a simple modifier.
    RemoveSimple(ModifierId),
    /// Add a simple modifier if absent, remove it if present.
    ToggleSimple(SimpleModifier),
    /// Upsert an effect in its default state.
    AddEffect(SuccessTestEffect),
    /// Upsert an effect with an explicit state.
    SetEffect(SuccessTestEffect, bool),
    /// Flip an effect by key.
    ToggleEffect(String),
    /// Select (or clear) the active pool action.
    TogglePoolAction(Option<(PoolType, PoolAction)>),
    /// Reserve points on every non-flex pool for spends made elsewhere.
    ReservePools(u32),
}

/// A success test being configured.
#[derive(Debug, Clone)]
pub struct SuccessTest {
    rating: i32,
    defaulting: bool,
    ids: ModifierIds,
    modifiers: Modifiers,
    pools: PoolResolution,
    target: Target,
}

impl SuccessTest {
    /// A test against a base rating with no modifiers or pools.
    pub fn new(rating: i32) -> Self {
        Self {
            rating,
            defaulting: false,
            ids: ModifierIds::new(),
            modifiers: Modifiers::new(),
            pools: PoolResolution::default(),
            target: Target::clamped(rating),
        }
    }

    /// A test for a character, drawing its pools and applicable effects.
    pub fn for_character<C>(character: &C, rating: i32) -> Self
    where
        C: HasPools + HasTestEffects,
    {
        Self::new(rating)
            .with_pools(character.pools())
            .with_effects(character.test_effects())
    }

    /// Replace the pools this test can draw from.
    pub fn with_pools(mut self, pools: Vec<Pool>) -> Self {
        self.pools = PoolResolution::new(pools);
        self.recompute();
        self
    }

    /// Add effects in their default states.
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = SuccessTestEffect>) -> Self {
        for effect in effects {
            self.modifiers.add_effect(effect);
        }
        self.recompute();
        self
    }

    /// Apply one change and return the updated test.
    pub fn with(mut self, change: TestChange) -> Self {
        self.apply(change);
        self
    }

    /// Apply one change in place.
    pub fn apply(&mut self, change: TestChange) {
        match change {
            TestChange::SetRating(rating) => self.rating = rating,
            TestChange::SetDefaulting(defaulting) => self.defaulting = defaulting,
            TestChange::SetSimple(modifier) => self.modifiers.set_simple(modifier),
            TestChange::RemoveSimple(id) => {
                self.modifiers.remove_simple(id);
            }
            TestChange::ToggleSimple(modifier) => self.modifiers.toggle_simple(modifier),
            TestChange::AddEffect(effect) => self.modifiers.add_effect(effect),
            TestChange::SetEffect(effect, active) => self.modifiers.set_effect(effect, active),
            TestChange::ToggleEffect(key) => {
                self.modifiers.toggle_effect(&key);
            }
            TestChange::TogglePoolAction(pair) => {
                self.pools.toggle_active(pair);
            }
            TestChange::ReservePools(amount) => self.pools.set_reserved(amount),
        }
        self.recompute();
    }

    /// Create a simple modifier with a fresh id without adding it.
    pub fn create_modifier(&mut self, name: impl Into<String>, value: i32) -> SimpleModifier {
        self.ids.create(name, value)
    }

    /// Create and add a simple modifier. Returns its id.
    pub fn add_modifier(&mut self, name: impl Into<String>, value: i32) -> ModifierId {
        let modifier = self.ids.create(name, value);
        let id = modifier.id;
        self.apply(TestChange::SetSimple(modifier));
        id
    }

    /// The base rating.
    pub fn rating(&self) -> i32 {
        self.rating
    }

    /// Whether the character is defaulting.
    pub fn is_defaulting(&self) -> bool {
        self.defaulting
    }

    /// The effective target number.
    pub fn target(&self) -> Target {
        self.target
    }

    /// The modifiers in play.
    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    /// The pools in play.
    pub fn pools(&self) -> &PoolResolution {
        &self.pools
    }

    /// Roll and freeze the result.
    ///
    /// An active [`PoolAction::Improve`] raises the rolled tier one step.
    pub fn commit<S: DigitSource>(self, roller: &mut Percentile<S>) -> SuccessTestRecord {
        let roll = roller.roll();
        let rolled = classify(roll.roll(), self.target, self.defaulting);
        let committed = self.pools.committed();
        let result = match committed {
            Some((_, PoolAction::Improve)) => rolled.improve_one_step(),
            _ => rolled,
        };

        debug!(
            roll = %roll,
            target = %self.target,
            defaulting = self.defaulting,
            rolled = %rolled,
            result = %result,
            pool = ?committed,
            "success test committed"
        );

        SuccessTestRecord::new(
            roll,
            self.target,
            result,
            self.defaulting,
            self.applied_modifiers(),
            committed,
        )
    }

    fn ignoring_penalties(&self) -> bool {
        self.pools.active_action() == Some(PoolAction::IgnoreMods)
    }

    fn recompute(&mut self) {
        let modifiers = if self.ignoring_penalties() {
            self.modifiers.effective_value_ignoring_penalties()
        } else {
            self.modifiers.effective_value()
        };
        let bonus = match self.pools.active() {
            Some((pool, PoolAction::Bonus)) => {
                trace!(pool = %pool.pool_type(), "pool bonus applied");
                POOL_BONUS
            }
            _ => 0,
        };
        self.target = Target::clamped(self.rating.saturating_add(modifiers).saturating_add(bonus));
        trace!(rating = self.rating, modifiers, bonus, target = %self.target, "target recomputed");
    }

    fn applied_modifiers(&self) -> Vec<ModifierSnapshot> {
        let ignoring = self.ignoring_penalties();
        let mut applied: Vec<_> = self
            .modifiers
            .snapshots()
            .into_iter()
            .map(|mut snapshot| {
                if ignoring && snapshot.value < 0 {
                    snapshot.active = false;
                }
                snapshot
            })
            .collect();
        if let Some((pool, PoolAction::Bonus)) = self.pools.active() {
            applied.push(ModifierSnapshot {
                origin: ModifierOrigin::Pool(pool.pool_type()),
                name: format!("{} Pool", pool.pool_type()),
                value: POOL_BONUS,
                temporary: true,
                active: true,
            });
        }
        applied
    }
}

/// Roll a bare test against a target with no configuration step.
pub fn roll_success_test<S: DigitSource>(
    target: i32,
    defaulting: bool,
    roller: &mut Percentile<S>,
) -> SuccessTestRecord {
    SuccessTest::new(target)
        .with(TestChange::SetDefaulting(defaulting))
        .commit(roller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{PercentileRoll, ScriptedDigits};
    use crate::result::ResultTier;

    fn roller(rolls: &[u32]) -> Percentile<ScriptedDigits> {
        Percentile::new(ScriptedDigits::from_rolls(
            rolls.iter().map(|r| PercentileRoll::try_from(*r).unwrap()),
        ))
    }

    struct Character {
        pools: Vec<Pool>,
        effects: Vec<SuccessTestEffect>,
    }

    impl HasPools for Character {
        fn pools(&self) -> Vec<Pool> {
            self.pools.clone()
        }
    }

    impl HasTestEffects for Character {
        fn test_effects(&self) -> Vec<SuccessTestEffect> {
            self.effects.clone()
        }
    }

    #[test]
    fn target_tracks_modifiers() {
        let mut test = SuccessTest::new(50);
        assert_eq!(test.target().value(), 50);
        let wounded = test.add_modifier("Wounded", -10);
        assert_eq!(test.target().value(), 40);
        test.apply(TestChange::RemoveSimple(wounded));
        assert_eq!(test.target().value(), 50);
    }

    #[test]
    fn target_clamped_both_ways() {
        let mut test = SuccessTest::new(90);
        test.add_modifier("Tools", 30);
        assert_eq!(test.target().value(), 99);
        test.apply(TestChange::SetRating(10));
        test.add_modifier("Blind", -50);
        assert_eq!(test.target().value(), 0);
    }

    #[test]
    fn with_builds_next_state() {
        let test = SuccessTest::new(40)
            .with(TestChange::SetDefaulting(true))
            .with(TestChange::AddEffect(SuccessTestEffect::new("aim", "Aim", 10)));
        assert!(test.is_defaulting());
        assert_eq!(test.target().value(), 50);
        let test = test.with(TestChange::ToggleEffect("aim".to_string()));
        assert_eq!(test.target().value(), 40);
    }

    #[test]
    fn character_supplies_pools_and_effects() {
        let character = Character {
            pools: vec![Pool::new(PoolType::Insight, 2)],
            effects: vec![
                SuccessTestEffect::new("implant", "Mnemonic Implant", 10),
                SuccessTestEffect::new("focus", "Focus", 20).with_requirement("Meditating"),
            ],
        };
        let test = SuccessTest::for_character(&character, 45);
        assert_eq!(test.target().value(), 55);
        assert_eq!(test.pools().available().len(), 1);
    }

    #[test]
    fn bonus_pool_adds_twenty() {
        let mut test = SuccessTest::new(30).with_pools(vec![Pool::new(PoolType::Moxie, 1)]);
        test.apply(TestChange::TogglePoolAction(Some((
            PoolType::Moxie,
            PoolAction::Bonus,
        ))));
        assert_eq!(test.target().value(), 50);
        test.apply(TestChange::TogglePoolAction(None));
        assert_eq!(test.target().value(), 30);
    }

    #[test]
    fn ignore_mods_drops_penalties() {
        let mut test = SuccessTest::new(50).with_pools(vec![Pool::new(PoolType::Vigor, 1)]);
        test.add_modifier("Wounded", -20);
        test.add_modifier("Tools", 10);
        assert_eq!(test.target().value(), 40);
        test.apply(TestChange::TogglePoolAction(Some((
            PoolType::Vigor,
            PoolAction::IgnoreMods,
        ))));
        assert_eq!(test.target().value(), 60);

        let record = test.commit(&mut roller(&[12]));
        let wounded = &record.modifiers_applied()[0];
        assert_eq!(wounded.value, -20);
        assert!(!wounded.active);
    }

    #[test]
    fn commit_classifies_against_target() {
        let mut test = SuccessTest::new(40);
        test.add_modifier("Specialization", 10);
        let record = test.commit(&mut roller(&[45]));
        assert_eq!(record.roll().roll().value(), 45);
        assert_eq!(record.target().value(), 50);
        assert_eq!(record.result(), ResultTier::SuperiorSuccess);
        assert_eq!(record.modifiers_applied().len(), 1);
        assert!(record.pool_used().is_none());
    }

    #[test]
    fn commit_improves_with_pool() {
        let mut test = SuccessTest::new(50).with_pools(vec![Pool::new(PoolType::Insight, 2)]);
        test.apply(TestChange::TogglePoolAction(Some((
            PoolType::Insight,
            PoolAction::Improve,
        ))));
        let record = test.commit(&mut roller(&[12]));
        assert_eq!(record.result(), ResultTier::SuperiorSuccess);
        assert_eq!(record.pool_used().map(|p| p.spent()), Some(1));
        assert_eq!(record.pool_action(), Some(PoolAction::Improve));
    }

    #[test]
    fn improve_does_not_touch_failures() {
        let mut test = SuccessTest::new(20).with_pools(vec![Pool::new(PoolType::Flex, 1)]);
        test.apply(TestChange::TogglePoolAction(Some((
            PoolType::Flex,
            PoolAction::Improve,
        ))));
        let record = test.commit(&mut roller(&[45]));
        assert_eq!(record.result(), ResultTier::SuperiorFailure);
    }

    #[test]
    fn bonus_recorded_as_modifier() {
        let mut test = SuccessTest::new(30).with_pools(vec![Pool::new(PoolType::Moxie, 1)]);
        test.apply(TestChange::TogglePoolAction(Some((
            PoolType::Moxie,
            PoolAction::Bonus,
        ))));
        let record = test.commit(&mut roller(&[45]));
        assert_eq!(record.result(), ResultTier::SuperiorSuccess);
        let last = record.modifiers_applied().last().unwrap();
        assert_eq!(last.origin, ModifierOrigin::Pool(PoolType::Moxie));
        assert_eq!(last.value, POOL_BONUS);
    }

    #[test]
    fn each_commit_is_an_independent_roll() {
        let test = SuccessTest::new(50);
        let mut dice = roller(&[12, 88]);
        let first = test.clone().commit(&mut dice);
        let second = test.commit(&mut dice);
        assert_eq!(first.result(), ResultTier::Success);
        assert_eq!(second.result(), ResultTier::CriticalFailure);
    }

    #[test]
    fn roll_bare_test() {
        let record = roll_success_test(99, true, &mut roller(&[0]));
        assert_eq!(record.result(), ResultTier::Success);
        assert!(record.is_defaulting());
        let record = roll_success_test(150, false, &mut roller(&[0]));
        assert_eq!(record.target().value(), 99);
        assert_eq!(record.result(), ResultTier::CriticalSuccess);
    }

    #[test]
    fn modifier_ids_are_per_test() {
        let mut a = SuccessTest::new(10);
        let mut b = SuccessTest::new(10);
        assert_eq!(a.add_modifier("x", 1), b.add_modifier("y", 2));
    }
}
