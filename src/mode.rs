//! Editor mode glue
//!
//! A [`Mode`] is what an editor attaches to a document: it owns a tokenizer
//! and answers "tokens for this line, given the state the previous line
//! ended in". Caching end states per line is the host's job.

use crate::error::ProcessingResult;
use crate::grammars;
use crate::token::StateId;
use crate::tokenizer::{TokenizedLine, Tokenizer};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Mode {
    tokenizer: Arc<Tokenizer>,
}

impl Mode {
    pub fn new(tokenizer: Arc<Tokenizer>) -> Self {
        Self { tokenizer }
    }

    /// Mode for a built-in grammar (`sh`, `text`).
    pub fn for_grammar(name: &str) -> ProcessingResult<Self> {
        Ok(Self::new(grammars::lookup(name)?))
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// State to use for the first line of a document.
    pub fn initial_state(&self) -> StateId {
        self.tokenizer.start_state()
    }

    pub fn get_line_tokens<'a>(&self, line: &'a str, previous: Option<StateId>) -> TokenizedLine<'a> {
        self.tokenizer.tokenize(line, previous)
    }
}
