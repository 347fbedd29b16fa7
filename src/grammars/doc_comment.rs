//! Documentation comment grammar
//!
//! Meant to be embedded, not used on its own: it knows how to color the
//! inside of a doc block (`@tags`, `TODO` markers, prose) but has no idea how
//! the block ends. The host supplies that through exit rules, usually
//! [`end_rule`] for C-style `/** ... */` blocks.

use crate::rules::{Rule, RuleTable, START_STATE};
use crate::token::TokenKind;

pub fn rules() -> RuleTable {
    let mut table = RuleTable::new();
    table.set_state(
        START_STATE,
        vec![
            Rule::token(TokenKind::COMMENT_DOC_TAG, r"@[\w\d_]+"),
            Rule::token(TokenKind::COMMENT_DOC_TAG, r"\b(?:TODO|FIXME|XXX)\b"),
            Rule::token(TokenKind::COMMENT_DOC, r"\s+"),
            Rule::token(TokenKind::COMMENT_DOC, r"\w+"),
            Rule::token(TokenKind::COMMENT_DOC, "."),
        ],
    );
    table
}

/// Host rule opening a `/**` block and moving into `next`.
pub fn start_rule(next: &str) -> Rule {
    Rule::token(TokenKind::COMMENT_DOC, r"/\*\*(?!/)").next(next)
}

/// Exit rule closing a block on `*/` and returning to the host state `next`.
pub fn end_rule(next: &str) -> Rule {
    Rule::token(TokenKind::COMMENT_DOC, r"\*/").next(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::pairs;

    fn c_like() -> RuleTable {
        let mut table = RuleTable::new();
        table
            .add_state(
                START_STATE,
                vec![
                    start_rule("doc-start"),
                    Rule::token(TokenKind::IDENTIFIER, r"\w+"),
                    Rule::token(TokenKind::TEXT, r"\s+"),
                ],
            )
            .unwrap();
        table
            .embed(&rules(), "doc-", vec![end_rule(START_STATE)])
            .unwrap();
        table
    }

    #[test]
    fn test_block_on_one_line() {
        let tokenizer = c_like().compile().unwrap();
        let line = tokenizer.tokenize("/** @param x TODO */ code", None);
        assert_eq!(
            pairs(&line),
            vec![
                ("comment.doc", "/**"),
                ("comment.doc", " "),
                ("comment.doc.tag", "@param"),
                ("comment.doc", " "),
                ("comment.doc", "x"),
                ("comment.doc", " "),
                ("comment.doc.tag", "TODO"),
                ("comment.doc", " "),
                ("comment.doc", "*/"),
                ("text", " "),
                ("identifier", "code"),
            ]
        );
        assert_eq!(line.end_state, tokenizer.start_state());
    }

    #[test]
    fn test_block_across_lines() {
        let tokenizer = c_like().compile().unwrap();
        let first = tokenizer.tokenize("/**", None);
        assert_eq!(tokenizer.state_name(first.end_state), "doc-start");

        let second = tokenizer.tokenize(" * @return nothing", Some(first.end_state));
        assert_eq!(tokenizer.state_name(second.end_state), "doc-start");
        assert!(second
            .tokens
            .iter()
            .all(|token| token.kind.is_within("comment.doc")));

        let third = tokenizer.tokenize(" */ after", Some(second.end_state));
        assert_eq!(third.end_state, tokenizer.start_state());
        assert_eq!(third.tokens.last().map(|t| t.text), Some("after"));
    }

    #[test]
    fn test_empty_block_comment_is_not_a_doc_block() {
        let tokenizer = c_like().compile().unwrap();
        let line = tokenizer.tokenize("/**/", None);
        assert_eq!(line.end_state, tokenizer.start_state());
    }
}
