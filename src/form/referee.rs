//! Referee card tendencies

use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Card average assumed for an unknown referee
pub const DEFAULT_REFEREE_AVERAGE: f64 = 4.0;

/// Mean combined cards per match for one referee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefereeProfile {
    pub name: String,
    pub matches: usize,
    pub mean_cards: f64,
}

/// Referee profiles derived from a league's history
#[derive(Debug, Clone, Default)]
pub struct RefereeStats {
    profiles: BTreeMap<String, RefereeProfile>,
}

impl RefereeStats {
    /// Build profiles from every match with a named referee
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut totals: BTreeMap<String, (usize, u32)> = BTreeMap::new();
        for m in dataset.matches() {
            if let Some(referee) = m.referee.as_deref() {
                let entry = totals.entry(referee.to_string()).or_default();
                entry.0 += 1;
                entry.1 += m.total_cards();
            }
        }

        let profiles = totals
            .into_iter()
            .map(|(name, (matches, cards))| {
                let profile = RefereeProfile {
                    name: name.clone(),
                    matches,
                    mean_cards: cards as f64 / matches as f64,
                };
                (name, profile)
            })
            .collect();

        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Option<&RefereeProfile> {
        self.profiles.get(name)
    }

    /// Profiles sorted by name
    pub fn profiles(&self) -> impl Iterator<Item = &RefereeProfile> {
        self.profiles.values()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Where the referee card average for a matchup came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RefereeContext {
    /// Derived from the named referee's history
    Profile(RefereeProfile),
    /// Entered by the user
    Override { average: f64 },
    /// Referee not given or not found
    Default { average: f64 },
}

impl RefereeContext {
    /// Resolve a named referee, falling back to `default_average`
    pub fn resolve(stats: &RefereeStats, name: Option<&str>, default_average: f64) -> Self {
        match name.and_then(|n| stats.get(n)) {
            Some(profile) => RefereeContext::Profile(profile.clone()),
            None => {
                if let Some(n) = name {
                    tracing::debug!(referee = n, "Referee not found, using default average");
                }
                RefereeContext::Default {
                    average: default_average,
                }
            }
        }
    }

    /// Mean cards per match
    pub fn average(&self) -> f64 {
        match self {
            RefereeContext::Profile(p) => p.mean_cards,
            RefereeContext::Override { average } | RefereeContext::Default { average } => *average,
        }
    }

    /// Amount added to projected card totals
    ///
    /// Relative to the league baseline, so an average referee adds nothing
    /// and every extra card per match adds one to the projection.
    pub fn adjustment(&self, baseline: f64) -> f64 {
        self.average() - baseline
    }
}
