//! Psi range bands and the range modifier they impose.
//!
//! Touch is its own band. Otherwise the band depends on distance:
//! point-blank and close have fixed thresholds that each range boost
//! pushes out, and past close every started increment of distance costs
//! another penalty step.

use serde::{Deserialize, Serialize};

/// Base point-blank threshold.
pub const POINT_BLANK_RANGE: u32 = 2;
/// Base close threshold.
pub const CLOSE_RANGE: u32 = 10;
/// How far each boost pushes the point-blank threshold.
pub const POINT_BLANK_BOOST_STEP: u32 = 2;
/// How far each boost pushes the close threshold.
pub const CLOSE_BOOST_STEP: u32 = 10;
/// Distance past close covered by one penalty step.
pub const BEYOND_RANGE_INCREMENT: u32 = 2;
/// Modifier per penalty step beyond close range.
pub const BEYOND_RANGE_PENALTY: i32 = -10;
/// Modifier for touching the target.
pub const TOUCH_BONUS: i32 = 20;
/// Modifier at point-blank range.
pub const POINT_BLANK_BONUS: i32 = 10;

/// Where the band edges sit for a number of range boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeThresholds {
    /// Farthest point-blank distance.
    pub point_blank: u32,
    /// Farthest close distance.
    pub close: u32,
}

impl RangeThresholds {
    /// Thresholds with `boosts` range-extending effects active.
    pub fn with_boosts(boosts: u32) -> Self {
        Self {
            point_blank: POINT_BLANK_RANGE + boosts * POINT_BLANK_BOOST_STEP,
            close: CLOSE_RANGE + boosts * CLOSE_BOOST_STEP,
        }
    }
}

impl Default for RangeThresholds {
    fn default() -> Self {
        Self::with_boosts(0)
    }
}

/// A psi range band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeBand {
    /// In physical contact.
    Touch,
    /// Within the point-blank threshold.
    PointBlank,
    /// Within the close threshold.
    Close,
    /// Past close, by this many penalty steps.
    Beyond(u32),
}

impl RangeBand {
    /// The band for a distance. Never returns [`RangeBand::Touch`].
    pub fn for_distance(distance: u32, thresholds: RangeThresholds) -> Self {
        if distance <= thresholds.point_blank {
            Self::PointBlank
        } else if distance <= thresholds.close {
            Self::Close
        } else {
            Self::Beyond((distance - thresholds.close).div_ceil(BEYOND_RANGE_INCREMENT))
        }
    }

    /// The target number modifier for this band.
    pub fn modifier(self) -> i32 {
        match self {
            Self::Touch => TOUCH_BONUS,
            Self::PointBlank => POINT_BLANK_BONUS,
            Self::Close => 0,
            Self::Beyond(steps) => BEYOND_RANGE_PENALTY.saturating_mul(steps as i32),
        }
    }
}

impl std::fmt::Display for RangeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Touch => write!(f, "Range: Touch"),
            Self::PointBlank => write!(f, "Range: Point Blank"),
            Self::Close => write!(f, "Range: Close"),
            Self::Beyond(steps) => write!(f, "Beyond Range x{steps}"),
        }
    }
}
