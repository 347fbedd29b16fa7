//! Built-in grammars
//!
//! Each grammar module exposes a `rules()` constructor returning a fresh
//! [`RuleTable`]. Compiled tokenizers are built lazily, once per process, and
//! shared through [`lookup`]. A grammar that fails to compile is an authoring
//! bug; [`lookup`] keeps returning the same error rather than retrying.

pub mod doc_comment;
pub mod sh;
pub mod text;

use crate::error::{GrammarResult, ProcessingError, ProcessingResult};
use crate::rules::RuleTable;
use crate::tokenizer::Tokenizer;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Names accepted by [`lookup`] and [`rules`].
pub const NAMES: &[&str] = &["sh", "text"];

static SH: Lazy<GrammarResult<Arc<Tokenizer>>> =
    Lazy::new(|| sh::rules().and_then(|table| table.compile()).map(Arc::new));

static TEXT: Lazy<GrammarResult<Arc<Tokenizer>>> =
    Lazy::new(|| text::rules().compile().map(Arc::new));

/// Shared compiled tokenizer for a built-in grammar.
pub fn lookup(name: &str) -> ProcessingResult<Arc<Tokenizer>> {
    let compiled = match name {
        "sh" => &*SH,
        "text" => &*TEXT,
        other => return Err(ProcessingError::UnknownGrammar(other.to_string())),
    };
    compiled.clone().map_err(ProcessingError::from)
}

/// Fresh, uncompiled rule table for a built-in grammar, for callers that
/// want to extend it before compiling.
pub fn rules(name: &str) -> ProcessingResult<RuleTable> {
    match name {
        "sh" => Ok(sh::rules()?),
        "text" => Ok(text::rules()),
        other => Err(ProcessingError::UnknownGrammar(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_grammar_compiles() {
        for name in NAMES {
            let tokenizer = lookup(name).unwrap();
            assert_eq!(tokenizer.state_name(tokenizer.start_state()), "start");
        }
    }

    #[test]
    fn test_lookup_shares_one_instance() {
        let a = lookup("sh").unwrap();
        let b = lookup("sh").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_unknown_grammar() {
        assert!(matches!(
            lookup("cobol"),
            Err(ProcessingError::UnknownGrammar(name)) if name == "cobol"
        ));
        assert!(rules("cobol").is_err());
    }
}
