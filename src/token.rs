//! Token definitions
//!
//! A [`Token`] is a classified slice of one input line. Its [`TokenKind`] is a
//! dotted scope string (`keyword.operator`, `string.regexp`, ...) so themes can
//! style on prefixes, and its [`StateId`] records which state the tokenizer
//! was in right after the token was consumed.

use serde::{Serialize, Serializer};
use std::fmt;

/// Semantic tag of a token, e.g. `comment` or `keyword.operator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKind(&'static str);

impl TokenKind {
    pub const TEXT: TokenKind = TokenKind("text");
    pub const COMMENT: TokenKind = TokenKind("comment");
    pub const COMMENT_DOC: TokenKind = TokenKind("comment.doc");
    pub const COMMENT_DOC_TAG: TokenKind = TokenKind("comment.doc.tag");
    pub const STRING: TokenKind = TokenKind("string");
    pub const STRING_REGEXP: TokenKind = TokenKind("string.regexp");
    pub const STRING_INTERPOLATED: TokenKind = TokenKind("string.interpolated");
    pub const CONSTANT: TokenKind = TokenKind("constant");
    pub const CONSTANT_NUMERIC: TokenKind = TokenKind("constant.numeric");
    pub const CONSTANT_LANGUAGE: TokenKind = TokenKind("constant.language");
    pub const KEYWORD: TokenKind = TokenKind("keyword");
    pub const KEYWORD_OPERATOR: TokenKind = TokenKind("keyword.operator");
    pub const VARIABLE: TokenKind = TokenKind("variable");
    pub const VARIABLE_LANGUAGE: TokenKind = TokenKind("variable.language");
    pub const SUPPORT_FUNCTION: TokenKind = TokenKind("support.function");
    pub const INVALID_ILLEGAL: TokenKind = TokenKind("invalid.illegal");
    pub const INVALID_DEPRECATED: TokenKind = TokenKind("invalid.deprecated");
    pub const IDENTIFIER: TokenKind = TokenKind("identifier");
    pub const PAREN_LPAREN: TokenKind = TokenKind("paren.lparen");
    pub const PAREN_RPAREN: TokenKind = TokenKind("paren.rparen");

    /// Create a kind from any static scope string.
    pub const fn new(scope: &'static str) -> Self {
        TokenKind(scope)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }

    /// True if this kind is `scope` or nested below it (`comment` covers
    /// `comment.doc.tag`).
    pub fn is_within(self, scope: &str) -> bool {
        self.0 == scope
            || (self.0.len() > scope.len()
                && self.0.starts_with(scope)
                && self.0.as_bytes()[scope.len()] == b'.')
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Index of a compiled state inside a [`crate::Tokenizer`].
///
/// Ids are only meaningful for the tokenizer that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A classified fragment of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// State active after this token was consumed.
    pub state: StateId,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, state: StateId) -> Self {
        Self { kind, text, state }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within_scope() {
        assert!(TokenKind::COMMENT_DOC_TAG.is_within("comment"));
        assert!(TokenKind::COMMENT_DOC_TAG.is_within("comment.doc"));
        assert!(TokenKind::COMMENT.is_within("comment"));
        assert!(!TokenKind::COMMENT.is_within("comment.doc"));
        assert!(!TokenKind::new("commentary").is_within("comment"));
    }

    #[test]
    fn test_kind_serializes_as_plain_string() {
        let json = serde_json::to_string(&TokenKind::KEYWORD_OPERATOR).unwrap();
        assert_eq!(json, "\"keyword.operator\"");
    }
}
