//! Plain text grammar
//!
//! The base table other grammars are seeded from: one `start` state that
//! tags whole lines as `text`.

use crate::rules::{Rule, RuleTable, START_STATE};
use crate::token::TokenKind;

pub fn rules() -> RuleTable {
    let mut table = RuleTable::new();
    table.set_state(START_STATE, vec![Rule::token(TokenKind::TEXT, ".+")]);
    table
}
