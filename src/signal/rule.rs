//! Signal rule definitions
//!
//! A rule names a few derived quantities (`values`), states a conjunction of
//! threshold conditions over them (`when`) and carries a fixed confidence.
//! Rules are plain data so catalogs can be versioned as TOML files.

use super::template;
use crate::form::{Metric, MetricSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Arithmetic over the two teams' metrics and the referee adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Home team metric
    Home(Metric),
    /// Away team metric
    Away(Metric),
    /// Referee card adjustment
    Referee,
    Const(f64),
    Sum(Vec<Expr>),
    /// First minus second
    Diff(Box<Expr>, Box<Expr>),
    Mean(Vec<Expr>),
    /// First divided by second; undefined when the divisor is zero
    Ratio(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate; `None` when a metric is missing or the result is undefined
    pub fn eval(
        &self,
        home: &dyn MetricSource,
        away: &dyn MetricSource,
        referee_adj: f64,
    ) -> Option<f64> {
        let value = match self {
            Expr::Home(m) => home.metric(*m)?,
            Expr::Away(m) => away.metric(*m)?,
            Expr::Referee => referee_adj,
            Expr::Const(c) => *c,
            Expr::Sum(terms) => terms
                .iter()
                .map(|t| t.eval(home, away, referee_adj))
                .sum::<Option<f64>>()?,
            Expr::Diff(a, b) => {
                a.eval(home, away, referee_adj)? - b.eval(home, away, referee_adj)?
            }
            Expr::Mean(terms) => {
                if terms.is_empty() {
                    return None;
                }
                let total = terms
                    .iter()
                    .map(|t| t.eval(home, away, referee_adj))
                    .sum::<Option<f64>>()?;
                total / terms.len() as f64
            }
            Expr::Ratio(a, b) => {
                let denom = b.eval(home, away, referee_adj)?;
                if denom == 0.0 {
                    return None;
                }
                a.eval(home, away, referee_adj)? / denom
            }
        };
        value.is_finite().then_some(value)
    }
}

/// Threshold comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Comparison {
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Gt => value > threshold,
            Comparison::Ge => value >= threshold,
            Comparison::Lt => value < threshold,
            Comparison::Le => value <= threshold,
        }
    }
}

/// `value op threshold`, where `value` names one of the rule's values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub value: String,
    pub op: Comparison,
    pub threshold: f64,
}

/// A named betting-market pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRule {
    pub label: String,
    /// Template; `{name}` placeholders refer to `values`
    pub description: String,
    /// Static score in 0..=100, not derived from data
    pub confidence: u8,
    /// Reference decimal odds used for stake sizing
    #[serde(default)]
    pub payout: Option<f64>,
    #[serde(default)]
    pub values: BTreeMap<String, Expr>,
    pub when: Vec<Condition>,
}

impl SignalRule {
    /// Check internal consistency
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.confidence > 100 {
            return Err(RuleError::ConfidenceOutOfRange {
                rule: self.label.clone(),
                confidence: self.confidence,
            });
        }
        if self.when.is_empty() {
            return Err(RuleError::NoConditions(self.label.clone()));
        }
        if let Some(payout) = self.payout {
            if !(payout.is_finite() && payout > 1.0) {
                return Err(RuleError::InvalidPayout {
                    rule: self.label.clone(),
                    payout,
                });
            }
        }
        for condition in &self.when {
            if !self.values.contains_key(&condition.value) {
                return Err(RuleError::UnknownValue {
                    rule: self.label.clone(),
                    name: condition.value.clone(),
                });
            }
        }
        for name in template::placeholders(&self.description) {
            if !self.values.contains_key(&name) {
                return Err(RuleError::UnknownPlaceholder {
                    rule: self.label.clone(),
                    name,
                });
            }
        }
        Ok(())
    }
}

/// Rule catalog errors, raised when a catalog is loaded
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid rule catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Rule {rule:?}: condition refers to unknown value {name:?}")]
    UnknownValue { rule: String, name: String },
    #[error("Rule {rule:?}: description refers to unknown value {name:?}")]
    UnknownPlaceholder { rule: String, name: String },
    #[error("Rule {rule:?}: confidence {confidence} is above 100")]
    ConfidenceOutOfRange { rule: String, confidence: u8 },
    #[error("Rule {0:?} has no conditions")]
    NoConditions(String),
    #[error("Rule {rule:?}: payout {payout} must be above 1.0")]
    InvalidPayout { rule: String, payout: f64 },
}

/// Ordered list of rules; evaluation and output follow this order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    #[serde(default)]
    pub rules: Vec<SignalRule>,
}

impl RuleCatalog {
    /// Validated catalog from rules
    pub fn new(rules: Vec<SignalRule>) -> Result<Self, RuleError> {
        let catalog = Self { rules };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a TOML catalog (`[[rules]]` tables)
    pub fn from_toml(text: &str) -> Result<Self, RuleError> {
        let catalog: RuleCatalog = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a TOML catalog from disk
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        self.rules.iter().try_for_each(SignalRule::validate)
    }

    /// Football catalog shipped with the crate
    pub fn football() -> Self {
        toml::from_str(include_str!("../../rules/football.toml"))
            .expect("Invalid built-in football catalog")
    }

    /// Basketball catalog shipped with the crate
    pub fn basketball() -> Self {
        toml::from_str(include_str!("../../rules/basketball.toml"))
            .expect("Invalid built-in basketball catalog")
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl MetricSource for Fixed {
        fn team(&self) -> &str {
            "fixed"
        }
        fn metric(&self, metric: Metric) -> Option<f64> {
            (metric != Metric::NetRating).then_some(self.0)
        }
    }

    fn rule(toml_text: &str) -> SignalRule {
        let catalog: RuleCatalog = toml::from_str(toml_text).unwrap();
        catalog.rules.into_iter().next().unwrap()
    }

    #[test]
    fn test_builtin_catalogs_valid() {
        let football = RuleCatalog::football();
        football.validate().unwrap();
        assert!(football.len() >= 9);
        let basketball = RuleCatalog::basketball();
        basketball.validate().unwrap();
        assert_eq!(basketball.len(), 5);
    }

    #[test]
    fn test_expr_eval() {
        let home = Fixed(2.0);
        let away = Fixed(3.0);
        let sum = Expr::Sum(vec![
            Expr::Home(Metric::CardsFor),
            Expr::Away(Metric::CardsFor),
            Expr::Referee,
        ]);
        assert_eq!(sum.eval(&home, &away, 1.5), Some(6.5));

        let diff = Expr::Diff(
            Box::new(Expr::Home(Metric::GoalsFor)),
            Box::new(Expr::Const(0.5)),
        );
        assert_eq!(diff.eval(&home, &away, 0.0), Some(1.5));

        let mean = Expr::Mean(vec![Expr::Home(Metric::GoalsFor), Expr::Away(Metric::GoalsAgainst)]);
        assert_eq!(mean.eval(&home, &away, 0.0), Some(2.5));
    }

    #[test]
    fn test_expr_undefined() {
        let home = Fixed(2.0);
        let away = Fixed(0.0);
        let ratio = Expr::Ratio(
            Box::new(Expr::Home(Metric::GoalsFor)),
            Box::new(Expr::Away(Metric::GoalsFor)),
        );
        assert_eq!(ratio.eval(&home, &away, 0.0), None);
        assert_eq!(Expr::Home(Metric::NetRating).eval(&home, &away, 0.0), None);
        assert_eq!(Expr::Mean(vec![]).eval(&home, &away, 0.0), None);
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::Ge.holds(5.0, 5.0));
        assert!(!Comparison::Gt.holds(5.0, 5.0));
        assert!(Comparison::Le.holds(5.0, 5.0));
        assert!(!Comparison::Lt.holds(5.0, 5.0));
    }

    #[test]
    fn test_parse_rule_toml() {
        let r = rule(
            r#"
            [[rules]]
            label = "Over cards"
            description = "Projected cards {cards}"
            confidence = 70
            payout = 1.9

            [rules.values]
            cards = { sum = [{ home = "cards_for" }, { away = "cards_for" }, "referee"] }

            [[rules.when]]
            value = "cards"
            op = ">="
            threshold = 5.0
            "#,
        );
        assert_eq!(r.confidence, 70);
        assert_eq!(r.payout, Some(1.9));
        assert_eq!(r.when[0].op, Comparison::Ge);
        assert_eq!(
            r.values["cards"],
            Expr::Sum(vec![
                Expr::Home(Metric::CardsFor),
                Expr::Away(Metric::CardsFor),
                Expr::Referee
            ])
        );
    }

    #[test]
    fn test_validate_unknown_value() {
        let text = r#"
            [[rules]]
            label = "Broken"
            description = "x"
            confidence = 50
            [rules.values]
            a = { const = 1.0 }
            [[rules.when]]
            value = "b"
            op = ">"
            threshold = 0.0
        "#;
        assert!(matches!(
            RuleCatalog::from_toml(text),
            Err(RuleError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_validate_unknown_placeholder() {
        let text = r#"
            [[rules]]
            label = "Broken"
            description = "value {missing}"
            confidence = 50
            [rules.values]
            a = { const = 1.0 }
            [[rules.when]]
            value = "a"
            op = ">"
            threshold = 0.0
        "#;
        assert!(matches!(
            RuleCatalog::from_toml(text),
            Err(RuleError::UnknownPlaceholder { .. })
        ));
    }

    #[test]
    fn test_validate_confidence_and_payout() {
        let mut r = RuleCatalog::football().rules.remove(0);
        r.confidence = 101;
        assert!(matches!(
            r.validate(),
            Err(RuleError::ConfidenceOutOfRange { .. })
        ));
        r.confidence = 80;
        r.payout = Some(1.0);
        assert!(matches!(r.validate(), Err(RuleError::InvalidPayout { .. })));
        r.payout = None;
        r.when.clear();
        assert!(matches!(r.validate(), Err(RuleError::NoConditions(_))));
    }

    #[test]
    fn test_unknown_metric_rejected() {
        let text = r#"
            [[rules]]
            label = "Broken"
            description = "x"
            confidence = 50
            [rules.values]
            a = { home = "expected_goals" }
            [[rules.when]]
            value = "a"
            op = ">"
            threshold = 0.0
        "#;
        assert!(matches!(RuleCatalog::from_toml(text), Err(RuleError::Parse(_))));
    }
}
