//! Signal rule evaluation

use super::{template, RuleCatalog, RuleError, SignalRecord, SignalRule};
use crate::form::MetricSource;
use std::collections::BTreeMap;

/// Evaluates a rule catalog against two team aggregates
///
/// The evaluator knows nothing about what a metric means; it only computes
/// each rule's values and checks its conditions. Output order is catalog
/// order and every rule that holds is reported.
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    catalog: RuleCatalog,
}

impl SignalEvaluator {
    /// Create an evaluator over a validated catalog
    pub fn new(catalog: RuleCatalog) -> Result<Self, RuleError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Evaluate every rule once
    pub fn evaluate(
        &self,
        home: &dyn MetricSource,
        away: &dyn MetricSource,
        referee_adj: f64,
    ) -> Vec<SignalRecord> {
        let signals: Vec<SignalRecord> = self
            .catalog
            .rules
            .iter()
            .filter_map(|rule| evaluate_rule(rule, home, away, referee_adj))
            .collect();

        metrics::counter!("formsignals_signals_fired_total").increment(signals.len() as u64);
        tracing::debug!(
            home = home.team(),
            away = away.team(),
            rules = self.catalog.len(),
            fired = signals.len(),
            "Evaluated signal rules"
        );

        signals
    }
}

/// One rule against two aggregates; `None` when it does not fire
///
/// A rule whose values cannot all be computed (metric missing for this kind
/// of aggregate, division by zero) does not fire.
pub fn evaluate_rule(
    rule: &SignalRule,
    home: &dyn MetricSource,
    away: &dyn MetricSource,
    referee_adj: f64,
) -> Option<SignalRecord> {
    let mut values = BTreeMap::new();
    for (name, expr) in &rule.values {
        match expr.eval(home, away, referee_adj) {
            Some(v) => {
                values.insert(name.clone(), v);
            }
            None => {
                tracing::trace!(rule = %rule.label, value = %name, "Value undefined, rule skipped");
                return None;
            }
        }
    }

    let holds = rule.when.iter().all(|c| {
        values
            .get(&c.value)
            .is_some_and(|v| c.op.holds(*v, c.threshold))
    });
    if !holds {
        return None;
    }

    Some(SignalRecord {
        label: rule.label.clone(),
        description: template::render(&rule.description, &values),
        confidence: rule.confidence,
        payout: rule.payout,
        values,
        stake: None,
    })
}
