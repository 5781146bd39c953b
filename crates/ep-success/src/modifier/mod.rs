//! Modifier aggregation for a success test.
//!
//! Two kinds of modifier shift the target number:
//! - **simple** modifiers, flat values keyed by a [`ModifierId`]. Setting an
//!   existing id replaces it, which is how recomputed modifiers (range
//!   penalties and the like) stay single entries.
//! - **effects**, rule effects supplied by the host that the user can
//!   toggle on and off without removing them.

pub mod effect;

pub use effect::{SuccessTestEffect, effect_default_active};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pool::PoolType;

/// Anything that can supply the rule effects applicable to a test.
pub trait HasTestEffects {
    /// Candidate effects, each carrying its own requirement flags.
    fn test_effects(&self) -> Vec<SuccessTestEffect>;
}

impl HasTestEffects for Vec<SuccessTestEffect> {
    fn test_effects(&self) -> Vec<SuccessTestEffect> {
        self.clone()
    }
}

/// Identity of a simple modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModifierId(u32);

impl ModifierId {
    /// The raw id.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic modifier id generator. Each test owns one, so ids are
/// predictable per test and never shared between tests.
#[derive(Debug, Clone, Default)]
pub struct ModifierIds {
    last: u32,
}

impl ModifierIds {
    /// A fresh generator. The first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> ModifierId {
        self.last += 1;
        ModifierId(self.last)
    }

    /// Create a simple modifier with a fresh id.
    pub fn create(&mut self, name: impl Into<String>, value: i32) -> SimpleModifier {
        SimpleModifier {
            id: self.next_id(),
            name: name.into(),
            value,
            temporary: false,
        }
    }
}

/// A flat named modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleModifier {
    /// Identity within its test.
    pub id: ModifierId,
    /// Display name.
    pub name: String,
    /// Target number shift.
    pub value: i32,
    /// Lives only as long as the situation that produced it.
    pub temporary: bool,
}

impl SimpleModifier {
    /// Mark the modifier as temporary.
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }
}

/// Where an applied modifier came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum ModifierOrigin {
    /// A simple modifier.
    Simple(ModifierId),
    /// A rule effect, by key.
    Effect(String),
    /// A pool bonus bought before the roll.
    Pool(PoolType),
}

/// A frozen view of one modifier at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSnapshot {
    /// Identity of the modifier.
    pub origin: ModifierOrigin,
    /// Display name.
    pub name: String,
    /// Target number shift.
    pub value: i32,
    /// Temporary modifier.
    pub temporary: bool,
    /// Counted toward the target.
    pub active: bool,
}

/// The modifiers applying to one success test.
#[derive(Debug, Clone, Default)]
pub struct Modifiers {
    effects: Vec<(SuccessTestEffect, bool)>,
    simple: BTreeMap<ModifierId, SimpleModifier>,
}

impl Modifiers {
    /// No modifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert an effect in its default state.
    pub fn add_effect(&mut self, effect: SuccessTestEffect) {
        let active = effect_default_active(&effect);
        self.set_effect(effect, active);
    }

    /// Upsert an effect with an explicit state.
    pub fn set_effect(&mut self, effect: SuccessTestEffect, active: bool) {
        match self.effects.iter_mut().find(|(e, _)| e.key == effect.key) {
            Some(entry) => *entry = (effect, active),
            None => self.effects.push((effect, active)),
        }
    }

    /// Flip an effect on or off. Returns the new state, or `None` if no
    /// effect has that key.
    pub fn toggle_effect(&mut self, key: &str) -> Option<bool> {
        let (_, active) = self.effects.iter_mut().find(|(e, _)| e.key == key)?;
        *active = !*active;
        Some(*active)
    }

    /// Whether the effect with this key is active.
    pub fn is_effect_active(&self, key: &str) -> Option<bool> {
        self.effects
            .iter()
            .find(|(e, _)| e.key == key)
            .map(|(_, active)| *active)
    }

    /// All effects with their states, in insertion order.
    pub fn effects(&self) -> impl Iterator<Item = (&SuccessTestEffect, bool)> {
        self.effects.iter().map(|(e, active)| (e, *active))
    }

    /// Upsert a simple modifier by id.
    pub fn set_simple(&mut self, modifier: SimpleModifier) {
        self.simple.insert(modifier.id, modifier);
    }

    /// Remove a simple modifier.
    pub fn remove_simple(&mut self, id: ModifierId) -> Option<SimpleModifier> {
        self.simple.remove(&id)
    }

    /// Add the modifier if its id is absent, remove it otherwise.
    pub fn toggle_simple(&mut self, modifier: SimpleModifier) {
        if self.simple.remove(&modifier.id).is_none() {
            self.simple.insert(modifier.id, modifier);
        }
    }

    /// Look up a simple modifier.
    pub fn simple(&self, id: ModifierId) -> Option<&SimpleModifier> {
        self.simple.get(&id)
    }

    /// All simple modifiers ordered by id.
    pub fn simple_modifiers(&self) -> impl Iterator<Item = &SimpleModifier> {
        self.simple.values()
    }

    /// Sum of every simple modifier and every active effect.
    pub fn effective_value(&self) -> i32 {
        self.counted_values().sum()
    }

    /// Like [`effective_value`](Self::effective_value) but with every
    /// negative contribution dropped.
    pub fn effective_value_ignoring_penalties(&self) -> i32 {
        self.counted_values().filter(|v| *v > 0).sum()
    }

    /// Freeze the current state: simple modifiers by id, then effects in
    /// insertion order.
    pub fn snapshots(&self) -> Vec<ModifierSnapshot> {
        let simple = self.simple.values().map(|m| ModifierSnapshot {
            origin: ModifierOrigin::Simple(m.id),
            name: m.name.clone(),
            value: m.value,
            temporary: m.temporary,
            active: true,
        });
        let effects = self.effects.iter().map(|(e, active)| ModifierSnapshot {
            origin: ModifierOrigin::Effect(e.key.clone()),
            name: e.source.clone(),
            value: e.modifier,
            temporary: false,
            active: *active,
        });
        simple.chain(effects).collect()
    }

    fn counted_values(&self) -> impl Iterator<Item = i32> + '_ {
        self.simple.values().map(|m| m.value).chain(
            self.effects
                .iter()
                .filter(|(_, active)| *active)
                .map(|(e, _)| e.modifier),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_per_generator() {
        let mut ids = ModifierIds::new();
        assert_eq!(ids.next_id().value(), 1);
        assert_eq!(ids.next_id().value(), 2);
        let mut other = ModifierIds::new();
        assert_eq!(other.next_id().value(), 1);
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(Modifiers::new().effective_value(), 0);
    }

    #[test]
    fn sums_simple_and_active_effects() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        mods.set_simple(ids.create("Wounded", -10));
        mods.set_simple(ids.create("Specialization", 10));
        mods.add_effect(SuccessTestEffect::new("aim", "Aiming", 10));
        mods.add_effect(SuccessTestEffect::new("rage", "Rage", 20).with_requirement("Enraged"));
        assert_eq!(mods.effective_value(), 10);
    }

    #[test]
    fn set_simple_replaces_by_id() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        let mut range = ids.create("Range: Close", 0);
        mods.set_simple(range.clone());
        range.name = "Beyond Range x2".to_string();
        range.value = -20;
        mods.set_simple(range.clone());
        assert_eq!(mods.simple_modifiers().count(), 1);
        assert_eq!(mods.effective_value(), -20);
        assert_eq!(mods.simple(range.id).map(|m| m.name.as_str()), Some("Beyond Range x2"));
    }

    #[test]
    fn remove_simple() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        let m = ids.create("Cover", -10);
        mods.set_simple(m.clone());
        assert_eq!(mods.remove_simple(m.id), Some(m.clone()));
        assert_eq!(mods.remove_simple(m.id), None);
        assert_eq!(mods.effective_value(), 0);
    }

    #[test]
    fn toggle_simple_adds_then_removes() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        let m = ids.create("Distracted", -20);
        mods.toggle_simple(m.clone());
        assert_eq!(mods.effective_value(), -20);
        mods.toggle_simple(m);
        assert_eq!(mods.effective_value(), 0);
    }

    #[test]
    fn effects_upsert_by_key() {
        let mut mods = Modifiers::new();
        mods.add_effect(SuccessTestEffect::new("aim", "Aiming", 10));
        mods.set_effect(SuccessTestEffect::new("aim", "Aiming (long)", 20), false);
        assert_eq!(mods.effects().count(), 1);
        assert_eq!(mods.is_effect_active("aim"), Some(false));
        assert_eq!(mods.effective_value(), 0);
    }

    #[test]
    fn toggle_effect_keeps_entry() {
        let mut mods = Modifiers::new();
        mods.add_effect(SuccessTestEffect::new("aim", "Aiming", 10));
        assert_eq!(mods.toggle_effect("aim"), Some(false));
        assert_eq!(mods.effective_value(), 0);
        assert_eq!(mods.toggle_effect("aim"), Some(true));
        assert_eq!(mods.effective_value(), 10);
        assert_eq!(mods.toggle_effect("missing"), None);
    }

    #[test]
    fn ignoring_penalties_drops_negatives() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        mods.set_simple(ids.create("Wounded", -20));
        mods.set_simple(ids.create("Tools", 10));
        mods.add_effect(SuccessTestEffect::new("dark", "Darkness", -10));
        assert_eq!(mods.effective_value(), -20);
        assert_eq!(mods.effective_value_ignoring_penalties(), 10);
    }

    #[test]
    fn snapshots_order_simple_then_effects() {
        let mut ids = ModifierIds::new();
        let mut mods = Modifiers::new();
        mods.add_effect(SuccessTestEffect::new("rage", "Rage", 20).with_requirement("Enraged"));
        let b = ids.create("B", 5);
        let a = ids.create("A", -5).temporary();
        mods.set_simple(a.clone());
        mods.set_simple(b.clone());

        let snaps = mods.snapshots();
        assert_eq!(snaps.len(), 3);
        assert_eq!(snaps[0].origin, ModifierOrigin::Simple(b.id));
        assert_eq!(snaps[1].origin, ModifierOrigin::Simple(a.id));
        assert!(snaps[1].temporary);
        assert_eq!(snaps[2].origin, ModifierOrigin::Effect("rage".to_string()));
        assert!(!snaps[2].active);
    }
}
