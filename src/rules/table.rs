//! Rule tables
//!
//! A [`RuleTable`] is the declarative, uncompiled form of a grammar: state
//! names mapped to ordered rule lists, kept in insertion order so that
//! building the same table twice always yields the same state ids.

use super::rule::Rule;
use crate::error::{GrammarError, GrammarResult};
use crate::tokenizer::Tokenizer;

/// Name of the initial (and default return) state.
pub const START_STATE: &str = "start";

/// Named states, each an ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    states: Vec<(String, Vec<Rule>)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state. Fails if the name is taken.
    pub fn add_state(&mut self, name: impl Into<String>, rules: Vec<Rule>) -> GrammarResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(GrammarError::DuplicateState(name));
        }
        self.states.push((name, rules));
        Ok(())
    }

    /// Builder form of [`RuleTable::add_state`].
    pub fn with_state(mut self, name: impl Into<String>, rules: Vec<Rule>) -> GrammarResult<Self> {
        self.add_state(name, rules)?;
        Ok(self)
    }

    /// Replace a state's rules, adding the state if it is new.
    ///
    /// This is how a grammar seeded from a base table overrides a base state.
    pub fn set_state(&mut self, name: impl Into<String>, rules: Vec<Rule>) {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.states[index].1 = rules,
            None => self.states.push((name, rules)),
        }
    }

    /// Append rules to the end of an existing state.
    pub fn extend_state(&mut self, name: &str, rules: Vec<Rule>) -> GrammarResult<()> {
        let state = self.rules_mut(name)?;
        state.extend(rules);
        Ok(())
    }

    /// Insert rules in front of an existing state's rules, keeping their order.
    pub fn prepend_rules(&mut self, name: &str, rules: Vec<Rule>) -> GrammarResult<()> {
        let state = self.rules_mut(name)?;
        state.splice(0..0, rules);
        Ok(())
    }

    pub fn state(&self, name: &str) -> Option<&[Rule]> {
        self.position(name).map(|index| self.states[index].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// State names in declaration order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    /// States and their rules in declaration order.
    pub fn states(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.states
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Check referential integrity: `start` exists and every `next` resolves.
    pub fn validate(&self) -> GrammarResult<()> {
        if !self.contains(START_STATE) {
            return Err(GrammarError::MissingStartState(START_STATE.to_string()));
        }
        for (name, rules) in &self.states {
            for (index, rule) in rules.iter().enumerate() {
                if let Some(target) = &rule.next {
                    if !self.contains(target) {
                        return Err(GrammarError::UndefinedState {
                            from: name.clone(),
                            rule: index,
                            target: target.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Validate and compile into a [`Tokenizer`].
    pub fn compile(&self) -> GrammarResult<Tokenizer> {
        Tokenizer::new(self)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|(state, _)| state == name)
    }

    pub(crate) fn push_state(&mut self, name: String, rules: Vec<Rule>) {
        self.states.push((name, rules));
    }

    pub(crate) fn rules_mut(&mut self, name: &str) -> GrammarResult<&mut Vec<Rule>> {
        match self.position(name) {
            Some(index) => Ok(&mut self.states[index].1),
            None => Err(GrammarError::UnknownState(name.to_string())),
        }
    }
}
