//! form-signals: rolling team form and rule-based match signals
//!
//! This library provides the core components for:
//! - Loading and parsing historical match results
//! - Rolling per-team form snapshots and referee card tendencies
//! - A data-driven signal rule catalog and its evaluator
//! - Independent-Poisson scoreline prediction
//! - Fractional Kelly stake sizing
//! - Matchup analysis reports for the CLI

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod form;
pub mod model;
pub mod risk;
pub mod signal;
pub mod telemetry;
