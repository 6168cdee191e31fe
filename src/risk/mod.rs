//! Stake sizing module
//!
//! Fractional Kelly stakes for fired signals

mod kelly;
mod types;

pub use kelly::{kelly_stake, StakeSizer, DEFAULT_KELLY_FRACTION};
pub use types::StakeRecommendation;
