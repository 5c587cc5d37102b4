//! Rule Base and Forward Chaining

use crate::catalog::default_rules;
use crate::fact::FactMap;
use crate::rule::{FiredRule, Rule};
use tracing::{debug, info};

/// Priority-ordered collection of rules
#[derive(Debug, Clone)]
pub struct RuleBase {
    /// Rules sorted by priority, highest first; ties keep insertion order
    rules: Vec<Rule>,
}

impl RuleBase {
    /// Create an empty rule base
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a rule base holding the built-in expert rules
    pub fn with_default_rules() -> Self {
        let mut base = Self::new();
        for rule in default_rules() {
            base.add_rule(rule);
        }
        info!("Rule base created with {} rules", base.len());
        base
    }

    /// Add a rule and restore priority order
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
        // stable: equal priorities stay in insertion order
        self.rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Forward-chaining pass: every rule whose condition holds, highest priority first
    pub fn infer(&self, facts: &FactMap) -> Vec<FiredRule> {
        let mut fired = Vec::new();

        for rule in &self.rules {
            match rule.matches(facts) {
                Ok(true) => {
                    debug!("Rule {} ({}) fired", rule.id, rule.name);
                    fired.push(rule.fire());
                }
                Ok(false) => {}
                Err(e) => {
                    debug!("Rule {} skipped: {}", rule.id, e);
                }
            }
        }

        debug!("{} of {} rules fired", fired.len(), self.rules.len());
        fired
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by ID
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the base has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleBase {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::rule::Conclusion;

    fn rule(id: &str, priority: i32, condition: Condition) -> Rule {
        Rule::new(id, id, "", condition, Conclusion::modifier(), priority)
    }

    #[test]
    fn test_add_rule_sorts_by_priority() {
        let mut base = RuleBase::new();
        base.add_rule(rule("low", 1, Condition::all([])));
        base.add_rule(rule("high", 9, Condition::all([])));
        base.add_rule(rule("mid", 5, Condition::all([])));

        let ids: Vec<&str> = base.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut base = RuleBase::new();
        base.add_rule(rule("first", 3, Condition::all([])));
        base.add_rule(rule("top", 7, Condition::all([])));
        base.add_rule(rule("second", 3, Condition::all([])));
        base.add_rule(rule("third", 3, Condition::all([])));

        let ids: Vec<&str> = base.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_infer_skips_failing_rule_only() {
        let mut base = RuleBase::new();
        base.add_rule(rule("numeric", 5, Condition::gt("pain_level", 5.0)));
        base.add_rule(rule("always", 1, Condition::all([])));

        let facts = FactMap::new().with("pain_level", "unbearable");
        let fired = base.infer(&facts);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].rule_id, "always");
    }

    #[test]
    fn test_infer_empty_facts() {
        let base = RuleBase::with_default_rules();
        assert!(base.infer(&FactMap::new()).is_empty());
    }

    #[test]
    fn test_default_catalog_order() {
        let base = RuleBase::default();
        let ids: Vec<&str> = base.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["R001", "R002", "R003", "R006", "R005", "R004", "R008", "R007", "R010", "R009"]
        );
        assert!(base.get("R009").is_some());
        assert!(base.get("R011").is_none());
    }
}
