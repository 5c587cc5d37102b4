//! Fuzzy Inference Engine
//!
//! Mamdani-style risk scoring: crisp inputs are fuzzified against linguistic
//! variables, a weighted rule table is evaluated with min-AND and
//! max-aggregation, and the clipped output sets are defuzzified by centroid.

mod analysis;
mod config;
mod engine;
mod error;
pub mod membership;
mod rules;
pub mod variable;

pub use analysis::{
    interpret, ActiveRule, FuzzyAnalysis, FuzzyInputs, Memberships, RuleEvaluation,
    UncertaintyLevel,
};
pub use config::FuzzyConfig;
pub use engine::FuzzyDiagnosisSystem;
pub use error::FuzzyError;
pub use membership::MembershipFunction;
pub use rules::{default_rules, FuzzyRule, Term};
pub use variable::{FuzzySet, LinguisticVariable};
