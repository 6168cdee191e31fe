//! Signal types

use crate::risk::StakeRecommendation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fired rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Rule label
    pub label: String,
    /// Description with computed values filled in
    pub description: String,
    /// The rule's static confidence score (0-100)
    pub confidence: u8,
    /// Reference decimal odds, when the rule carries one
    pub payout: Option<f64>,
    /// Values the rule computed, by name
    pub values: BTreeMap<String, f64>,
    /// Suggested stake, attached by the caller when sizing is enabled
    pub stake: Option<StakeRecommendation>,
}
