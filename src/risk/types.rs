//! Stake sizing types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Suggested stake for one signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeRecommendation {
    /// Decimal odds the stake was sized against
    pub payout: f64,
    /// Fractional Kelly share of bankroll, before the cap
    pub fraction: f64,
    /// Amount to stake after the cap, rounded to cents
    pub amount: Decimal,
}
