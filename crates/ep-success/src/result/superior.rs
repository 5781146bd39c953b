//! Superior result effects chosen after a superior success or failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bonus (or drawback) picked for each superior step of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuperiorResultEffect {
    /// Better quality of work.
    Quality,
    /// More of the result.
    Quantity,
    /// The task takes less time.
    Time,
    /// More detail or information gained.
    Detail,
    /// The action draws less attention.
    Covertness,
    /// Extra damage dealt (+1d6 per pick).
    Damage,
}

impl std::fmt::Display for SuperiorResultEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quality => write!(f, "Quality"),
            Self::Quantity => write!(f, "Quantity"),
            Self::Time => write!(f, "Time"),
            Self::Detail => write!(f, "Detail"),
            Self::Covertness => write!(f, "Covertness"),
            Self::Damage => write!(f, "Damage"),
        }
    }
}

/// Count how many times each effect was picked.
pub fn superior_effect_counts(
    effects: &[SuperiorResultEffect],
) -> BTreeMap<SuperiorResultEffect, u32> {
    effects.iter().fold(BTreeMap::new(), |mut counts, effect| {
        *counts.entry(*effect).or_insert(0) += 1;
        counts
    })
}
