//! Signal generation module
//!
//! Data-driven threshold rules over two team aggregates

mod evaluator;
mod rule;
mod template;
mod types;

pub use evaluator::{evaluate_rule, SignalEvaluator};
pub use rule::{Comparison, Condition, Expr, RuleCatalog, RuleError, SignalRule};
pub use template::{placeholders, render};
pub use types::SignalRecord;
