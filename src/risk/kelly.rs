//! Fractional Kelly stake sizing
//!
//! The confidence attached to a signal is a fixed per-rule score, not a
//! calibrated probability. Sizing treats it as one anyway, so stakes are only
//! as good as the rule's confidence constant.

use super::StakeRecommendation;
use crate::signal::SignalRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default Kelly multiplier (half Kelly)
pub const DEFAULT_KELLY_FRACTION: f64 = 0.5;

/// Fractional Kelly stake as a share of bankroll
///
/// `f* = (b*p - q) / b` with `b = payout - 1`, `p = confidence / 100`,
/// `q = 1 - p`, scaled by `fractional_factor` and floored at zero. Payouts
/// at or below 1.0 have no upside and stake nothing.
pub fn kelly_stake(confidence_pct: f64, payout_multiplier: f64, fractional_factor: f64) -> f64 {
    if !(payout_multiplier > 1.0) || !payout_multiplier.is_finite() {
        return 0.0;
    }

    let b = payout_multiplier - 1.0;
    let p = (confidence_pct / 100.0).clamp(0.0, 1.0);
    let q = 1.0 - p;

    let kelly = (b * p - q) / b;
    let stake = kelly * fractional_factor;

    if stake.is_finite() {
        stake.max(0.0)
    } else {
        0.0
    }
}

/// Turns signals into bankroll stakes
#[derive(Debug, Clone)]
pub struct StakeSizer {
    /// Kelly multiplier (e.g., 0.5 for half Kelly)
    pub fraction: f64,
    /// Maximum stake as a share of bankroll
    pub max_stake_pct: Decimal,
}

impl StakeSizer {
    /// Create a new stake sizer
    pub fn new(fraction: f64, max_stake_pct: Decimal) -> Self {
        Self {
            fraction,
            max_stake_pct,
        }
    }

    /// Stake for a confidence/payout pair
    pub fn recommend(
        &self,
        confidence_pct: f64,
        payout: f64,
        bankroll: Decimal,
    ) -> StakeRecommendation {
        let fraction = kelly_stake(confidence_pct, payout, self.fraction);
        let share = Decimal::try_from(fraction).unwrap_or(Decimal::ZERO);

        let amount = (bankroll * share)
            .min(bankroll * self.max_stake_pct)
            .max(dec!(0))
            .round_dp(2);

        StakeRecommendation {
            payout,
            fraction,
            amount,
        }
    }

    /// Stake for a fired signal; its own payout wins over `default_payout`
    pub fn size_signal(
        &self,
        signal: &SignalRecord,
        default_payout: Option<f64>,
        bankroll: Decimal,
    ) -> Option<StakeRecommendation> {
        let payout = signal.payout.or(default_payout)?;
        Some(self.recommend(signal.confidence as f64, payout, bankroll))
    }
}

impl Default for StakeSizer {
    fn default() -> Self {
        Self::new(DEFAULT_KELLY_FRACTION, dec!(0.05))
    }
}
