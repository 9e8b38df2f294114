//! Ordered first-match rule chains.
//!
//! Classifiers express their decision logic as a list of named predicates,
//! evaluated top to bottom. The first predicate that holds decides the
//! outcome; if none holds, the fallback applies. Rule order is the contract.

/// A named predicate with the outcome it selects.
pub struct Rule<C, O> {
    pub name: &'static str,
    pub when: fn(&C) -> bool,
    pub then: O,
}

/// Ordered list of rules with a fallback outcome.
pub struct RuleChain<C, O> {
    rules: Vec<Rule<C, O>>,
    otherwise: O,
}

impl<C, O: Clone> RuleChain<C, O> {
    /// Start a chain that yields `otherwise` when no rule matches.
    pub fn new(otherwise: O) -> Self {
        Self {
            rules: Vec::new(),
            otherwise,
        }
    }

    /// Append a rule. Earlier rules take priority.
    pub fn rule(mut self, name: &'static str, when: fn(&C) -> bool, then: O) -> Self {
        self.rules.push(Rule { name, when, then });
        self
    }

    /// First rule whose predicate holds for `ctx`.
    pub fn first_match(&self, ctx: &C) -> Option<&Rule<C, O>> {
        self.rules.iter().find(|rule| (rule.when)(ctx))
    }

    /// Outcome of the first matching rule, or the fallback.
    pub fn evaluate(&self, ctx: &C) -> O {
        self.first_match(ctx)
            .map(|rule| rule.then.clone())
            .unwrap_or_else(|| self.otherwise.clone())
    }

    /// Rule names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}
