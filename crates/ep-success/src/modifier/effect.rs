//! Toggleable rule effects that modify a success test.

use serde::{Deserialize, Serialize};

/// A rule effect supplied by the host that shifts the target number.
///
/// Identity is the `key`. Two effects with the same key are the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessTestEffect {
    /// Host-assigned identity.
    pub key: String,
    /// Where the effect comes from (trait, ware, condition...). Shown to the user.
    pub source: String,
    /// Target number shift while active.
    pub modifier: i32,
    /// A condition the user must confirm before the effect applies.
    pub requirement: Option<String>,
    /// Apply even when a requirement is set.
    pub active_by_default: bool,
}

impl SuccessTestEffect {
    /// An unconditional effect.
    pub fn new(key: impl Into<String>, source: impl Into<String>, modifier: i32) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            modifier,
            requirement: None,
            active_by_default: false,
        }
    }

    /// Attach a requirement. The effect then starts inactive.
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }

    /// Start active even though a requirement is set.
    pub fn active_by_default(mut self) -> Self {
        self.active_by_default = true;
        self
    }
}

/// Whether an effect starts active: unconditional effects do, conditional
/// ones only if flagged active by default.
pub fn effect_default_active(effect: &SuccessTestEffect) -> bool {
    effect.active_by_default || effect.requirement.is_none()
}
