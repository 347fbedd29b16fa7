//! Grammar embedding
//!
//! Embedding splices a donor table into a host table. Every donor state is
//! copied under `namespace + name` and the donor's internal transitions are
//! renamed with it, so the donor keeps working as a unit inside the host.
//! Exit rules supplied by the host are added to the donor's entry state;
//! their `next` names host states and is left untouched. The host declares
//! its own trigger rule moving into `namespace + "start"`.
//!
//! Exit rules go in front of the donor's rules unless [`Embedding::append`]
//! is used. Rule order is the only tie-break, so a donor rule that also
//! matches the terminator would otherwise keep the tokenizer embedded.

use super::rule::Rule;
use super::table::{RuleTable, START_STATE};
use crate::error::{GrammarError, GrammarResult};

/// Where exit rules are spliced into the donor states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPlacement {
    #[default]
    Prepend,
    Append,
}

/// A donor table waiting to be embedded into a host.
#[derive(Debug, Clone)]
pub struct Embedding<'d> {
    namespace: String,
    donor: &'d RuleTable,
    exit_rules: Vec<Rule>,
    exit_states: Option<Vec<String>>,
    placement: ExitPlacement,
}

impl<'d> Embedding<'d> {
    pub fn new(namespace: impl Into<String>, donor: &'d RuleTable) -> Self {
        Self {
            namespace: namespace.into(),
            donor,
            exit_rules: Vec::new(),
            exit_states: None,
            placement: ExitPlacement::default(),
        }
    }

    /// Rules returning control to the host.
    pub fn exit_rules(mut self, rules: Vec<Rule>) -> Self {
        self.exit_rules = rules;
        self
    }

    /// Donor states (unprefixed) receiving the exit rules. Defaults to the
    /// donor's `start` state.
    pub fn into_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exit_states = Some(states.into_iter().map(Into::into).collect());
        self
    }

    /// Add exit rules after the donor rules instead of before them.
    pub fn append(mut self) -> Self {
        self.placement = ExitPlacement::Append;
        self
    }

    /// Splice the donor into `host`.
    ///
    /// Nothing is written to `host` unless every check passes.
    pub fn apply(self, host: &mut RuleTable) -> GrammarResult<()> {
        let prefixed = |name: &str| format!("{}{}", self.namespace, name);

        for name in self.donor.state_names() {
            let state = prefixed(name);
            if host.contains(&state) {
                return Err(GrammarError::NamespaceCollision {
                    namespace: self.namespace.clone(),
                    state,
                });
            }
        }

        let exit_states = self
            .exit_states
            .clone()
            .unwrap_or_else(|| vec![START_STATE.to_string()]);
        for name in &exit_states {
            if !self.donor.contains(name) {
                return Err(GrammarError::UnknownState(prefixed(name)));
            }
        }

        for (name, rules) in self.donor.states() {
            let mut rules: Vec<Rule> = rules
                .iter()
                .cloned()
                .map(|rule| rule.with_prefixed_next(&self.namespace))
                .collect();

            if exit_states.iter().any(|exit| exit == name) {
                let exits = self.exit_rules.iter().cloned();
                match self.placement {
                    ExitPlacement::Prepend => {
                        rules.splice(0..0, exits);
                    }
                    ExitPlacement::Append => rules.extend(exits),
                }
            }

            host.push_state(prefixed(name), rules);
        }

        log::debug!(
            "embedded {} donor states under '{}'",
            self.donor.len(),
            self.namespace
        );
        Ok(())
    }
}

impl RuleTable {
    /// Embed `donor` under `namespace`, with `exit_rules` prepended to the
    /// donor's entry state.
    pub fn embed(
        &mut self,
        donor: &RuleTable,
        namespace: &str,
        exit_rules: Vec<Rule>,
    ) -> GrammarResult<()> {
        Embedding::new(namespace, donor)
            .exit_rules(exit_rules)
            .apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    fn donor() -> RuleTable {
        let mut table = RuleTable::new();
        table
            .add_state(
                "start",
                vec![
                    Rule::token(TokenKind::COMMENT_DOC_TAG, r"@\w+"),
                    Rule::token(TokenKind::COMMENT_DOC, r"\{").next("brace"),
                    Rule::token(TokenKind::COMMENT_DOC, "."),
                ],
            )
            .unwrap();
        table
            .add_state(
                "brace",
                vec![Rule::token(TokenKind::COMMENT_DOC, r"\}").next("start")],
            )
            .unwrap();
        table
    }

    fn host() -> RuleTable {
        let mut table = RuleTable::new();
        table
            .add_state(
                "start",
                vec![Rule::token(TokenKind::COMMENT_DOC, r"/\*\*").next("doc-start")],
            )
            .unwrap();
        table
    }

    fn exit() -> Rule {
        Rule::token(TokenKind::COMMENT_DOC, r"\*/").next("start")
    }

    fn patterns(table: &RuleTable, state: &str) -> Vec<String> {
        table
            .state(state)
            .unwrap()
            .iter()
            .map(|rule| rule.pattern.clone())
            .collect()
    }

    #[test]
    fn test_embed_prefixes_states_and_transitions() {
        let mut table = host();
        table.embed(&donor(), "doc-", vec![exit()]).unwrap();

        let names: Vec<_> = table.state_names().collect();
        assert_eq!(names, vec!["start", "doc-start", "doc-brace"]);

        let brace_next = table.state("doc-start").unwrap()[2].next.clone();
        assert_eq!(brace_next.as_deref(), Some("doc-brace"));
        let back = table.state("doc-brace").unwrap()[0].next.clone();
        assert_eq!(back.as_deref(), Some("doc-start"));
        table.validate().unwrap();
    }

    #[test]
    fn test_exit_rules_prepended_to_entry_state() {
        let mut table = host();
        table.embed(&donor(), "doc-", vec![exit()]).unwrap();

        assert_eq!(
            patterns(&table, "doc-start"),
            vec![r"\*/", r"@\w+", r"\{", "."]
        );
        // exit target is a host state, not prefixed
        assert_eq!(
            table.state("doc-start").unwrap()[0].next.as_deref(),
            Some("start")
        );
        assert_eq!(patterns(&table, "doc-brace"), vec![r"\}"]);
    }

    #[test]
    fn test_append_and_explicit_states() {
        let mut table = host();
        Embedding::new("doc-", &donor())
            .exit_rules(vec![exit()])
            .into_states(["start", "brace"])
            .append()
            .apply(&mut table)
            .unwrap();

        assert_eq!(
            patterns(&table, "doc-start"),
            vec![r"@\w+", r"\{", ".", r"\*/"]
        );
        assert_eq!(patterns(&table, "doc-brace"), vec![r"\}", r"\*/"]);
    }

    #[test]
    fn test_namespace_collision_leaves_host_untouched() {
        let mut table = host();
        table.add_state("doc-brace", vec![]).unwrap();

        let err = table.embed(&donor(), "doc-", vec![exit()]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::NamespaceCollision {
                namespace: "doc-".to_string(),
                state: "doc-brace".to_string(),
            }
        );
        let names: Vec<_> = table.state_names().collect();
        assert_eq!(names, vec!["start", "doc-brace"]);
    }

    #[test]
    fn test_unknown_exit_state() {
        let mut table = host();
        let err = Embedding::new("doc-", &donor())
            .exit_rules(vec![exit()])
            .into_states(["nowhere"])
            .apply(&mut table)
            .unwrap_err();
        assert_eq!(err, GrammarError::UnknownState("doc-nowhere".to_string()));
    }
}
