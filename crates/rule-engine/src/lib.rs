//! Forward-Chaining Rule Engine
//!
//! Evaluates a priority-ordered set of IF-THEN rules against a fact mapping
//! and reports every rule that fires, highest priority first.

mod catalog;
mod condition;
mod error;
mod fact;
mod rule;
mod rule_base;

pub use catalog::default_rules;
pub use condition::{Comparator, Condition};
pub use error::FactError;
pub use fact::{FactMap, FactValue};
pub use rule::{Conclusion, FiredRule, Rule};
pub use rule_base::RuleBase;
