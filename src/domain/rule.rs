//! Rules guarding configurations.

use std::fmt;

use itertools::Itertools;

use crate::domain::matcher::Matcher;

/// A predicate `(criterion, matcher, value)` over a named criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub criterion: String,
    pub matcher: Matcher,
    pub value: String,
}

impl Rule {
    pub fn new(criterion: impl Into<String>, matcher: Matcher, value: impl Into<String>) -> Self {
        Self {
            criterion: criterion.into(),
            matcher,
            value: value.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.criterion, self.matcher, self.value)
    }
}

/// Rules declared at one nesting level, in declaration order.
pub type RuleAccumulator = Vec<Rule>;

/// Conjunction of rules committed as the guard of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "All{{ {} }}", self.rules.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_rule_when_displaying_then_uses_matcher_label() {
        let rule = Rule::new("Colors", Matcher::IsNot, "Red");
        assert_eq!(rule.to_string(), "Colors IsNot Red");
    }

    #[test]
    fn given_rules_when_displaying_set_then_joins_in_order() {
        let set = RuleSet::new(vec![
            Rule::new("Colors", Matcher::Includes, "Red"),
            Rule::new("Colors", Matcher::Includes, "Blue"),
        ]);
        assert_eq!(
            set.to_string(),
            "All{ Colors Includes Red, Colors Includes Blue }"
        );
    }

    #[test]
    fn given_no_rules_when_displaying_set_then_renders_empty_conjunction() {
        assert_eq!(RuleSet::default().to_string(), "All{  }");
    }
}
