//! # rulelex
//!
//! A rule-driven line tokenizer for syntax highlighting.
//!
//! Grammars are declared as [`rules::RuleTable`]s: named states, each an
//! ordered list of regex rules. A rule either tags its match with a fixed
//! [`token::TokenKind`] or defers to a [`classifier::Classify`] implementation
//! (keywords vs. builtins vs. identifiers). Tables can be seeded from a base
//! table and can embed other tables under a namespace.
//!
//! A compiled [`tokenizer::Tokenizer`] consumes one line at a time. Each call
//! takes the state the previous line ended in and returns the tokens plus the
//! new end state, so multi-line constructs (continued strings, doc blocks)
//! survive line boundaries.
//!
//! ```text
//! let tokenizer = rulelex::grammars::lookup("sh")?;
//! let first = tokenizer.tokenize("echo 'abc\\", None);
//! let second = tokenizer.tokenize("def'", Some(first.end_state));
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod grammars;
pub mod mode;
pub mod processor;
pub mod rules;
pub mod token;
pub mod tokenizer;

#[cfg(test)]
pub mod testing;

pub use classifier::{Classify, LookupSets, WordClassifier};
pub use error::{GrammarError, ProcessingError};
pub use mode::Mode;
pub use rules::{Embedding, Rule, RuleAction, RuleTable};
pub use token::{StateId, Token, TokenKind};
pub use tokenizer::{TokenizedLine, Tokenizer};
