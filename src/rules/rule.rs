//! A single match rule

use crate::classifier::Classify;
use crate::token::TokenKind;
use std::fmt;
use std::sync::Arc;

/// What a rule does with the text it matched.
#[derive(Clone)]
pub enum RuleAction {
    /// Tag every match with this kind.
    Fixed(TokenKind),
    /// Ask a classifier for the kind of each matched lexeme.
    Classify(Arc<dyn Classify>),
}

impl RuleAction {
    /// Resolve the kind for a matched lexeme.
    pub fn kind_for(&self, lexeme: &str) -> TokenKind {
        match self {
            RuleAction::Fixed(kind) => *kind,
            RuleAction::Classify(classifier) => classifier.classify(lexeme),
        }
    }
}

impl fmt::Debug for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Fixed(kind) => f.debug_tuple("Fixed").field(kind).finish(),
            RuleAction::Classify(_) => f.write_str("Classify(..)"),
        }
    }
}

/// A pattern, what to tag its matches with, and where to go next.
///
/// Patterns are regexes matched at the current offset of the line. They are
/// compiled in multi-line mode, so `$` means end of line, and may use
/// lookaround. A rule only accepts an empty match when built with
/// [`Rule::zero_width`].
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub action: RuleAction,
    pub next: Option<String>,
    pub zero_width: bool,
}

impl Rule {
    /// A rule tagging matches of `pattern` with `kind`.
    pub fn token(kind: TokenKind, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RuleAction::Fixed(kind),
            next: None,
            zero_width: false,
        }
    }

    /// A rule whose kind is decided per lexeme by `classifier`.
    pub fn classify(classifier: Arc<dyn Classify>, pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: RuleAction::Classify(classifier),
            next: None,
            zero_width: false,
        }
    }

    /// Switch to `state` after this rule matches.
    pub fn next(mut self, state: impl Into<String>) -> Self {
        self.next = Some(state.into());
        self
    }

    /// Allow this rule to fire on an empty match (lookahead-only patterns).
    pub fn zero_width(mut self) -> Self {
        self.zero_width = true;
        self
    }

    /// Prefix the `next` target, used when the rule moves into a namespace.
    pub(crate) fn with_prefixed_next(mut self, namespace: &str) -> Self {
        if let Some(next) = self.next.take() {
            self.next = Some(format!("{}{}", namespace, next));
        }
        self
    }
}
