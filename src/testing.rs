//! Test helpers shared by the unit tests

use crate::token::TokenKind;
use crate::tokenizer::TokenizedLine;

/// Token texts of a line, in order.
pub fn texts<'a>(line: &TokenizedLine<'a>) -> Vec<&'a str> {
    line.tokens.iter().map(|token| token.text).collect()
}

/// Token kinds of a line, in order.
pub fn kinds(line: &TokenizedLine<'_>) -> Vec<TokenKind> {
    line.tokens.iter().map(|token| token.kind).collect()
}

/// `(kind, text)` pairs with kinds as strings, handy for table-style asserts.
pub fn pairs<'a>(line: &TokenizedLine<'a>) -> Vec<(&'static str, &'a str)> {
    line.tokens
        .iter()
        .map(|token| (token.kind.as_str(), token.text))
        .collect()
}
