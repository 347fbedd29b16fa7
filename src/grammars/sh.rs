//! POSIX shell grammar
//!
//! Seeded from the text grammar, with `start` replaced by shell rules and
//! two continuation states for quoted strings left open at end of line:
//!
//! - `qstring`: inside `'...'`, closed by the next `'`
//! - `qqstring`: inside `"..."`, closed by the next unescaped `"`
//!
//! A `: '` line opens a documentation block (the null-command idiom for
//! multi-line comments). Its body is colored by the embedded doc comment
//! grammar under the `doc-` namespace until the closing `'`.
//!
//! Words go through the shell [`WordClassifier`]. This is a highlighting
//! grammar, not a parser: `#` after a word character or a quote nested in
//! `$(...)` is not handled the way a shell would.

use super::{doc_comment, text};
use crate::classifier::{LookupSets, WordClassifier};
use crate::error::GrammarResult;
use crate::rules::{Rule, RuleTable, START_STATE};
use crate::token::TokenKind;
use std::sync::Arc;

pub const QSTRING: &str = "qstring";
pub const QQSTRING: &str = "qqstring";
pub const DOC_NAMESPACE: &str = "doc-";

const WORD_PATTERN: &str = r"\$?[a-zA-Z_][a-zA-Z0-9_]*\b";
// `{`, `}` and `!` are reserved words only when they stand alone
const RESERVED_PUNCT_PATTERN: &str = r"(?<![^\s;&|()])[{}!](?![^\s;&|()])";

/// Shell vocabulary for the word classifier.
pub const WORDS: LookupSets = LookupSets {
    keywords: &[
        "!", "{", "}", "case", "do", "done", "elif", "else", "esac", "fi", "for", "if", "in",
        "then", "until", "while",
    ],
    constants: &["true", "false"],
    variables: &[
        "$HOME", "$PATH", "$PWD", "$OLDPWD", "$IFS", "$PS1", "$PS2", "$PS4", "$LINENO", "$PPID",
        "$SHLVL", "$RANDOM", "$ENV", "$OPTARG", "$OPTIND",
    ],
    // unspecified by POSIX, reserved by some shells
    future_reserved: &["function", "select", "coproc"],
    functions: &[
        "alias", "bg", "break", "cd", "command", "continue", "echo", "eval", "exec", "exit",
        "export", "fc", "fg", "getopts", "hash", "jobs", "kill", "local", "printf", "pwd",
        "read", "readonly", "return", "set", "shift", "source", "test", "times", "trap", "type",
        "ulimit", "umask", "unalias", "unset", "wait",
    ],
    deprecated: Some("egrep"),
    sigil_pattern: Some(r"\$[a-zA-Z_][a-zA-Z0-9_]*"),
    contextual: &[],
};

/// The shell word classifier.
pub fn classifier() -> GrammarResult<WordClassifier> {
    WordClassifier::standard(&WORDS)
}

/// Build the shell rule table.
pub fn rules() -> GrammarResult<RuleTable> {
    let words = Arc::new(classifier()?);
    let mut table = text::rules();

    table.set_state(
        START_STATE,
        vec![
            Rule::token(TokenKind::new("comment.shebang"), r"^#!.*$"),
            Rule::token(TokenKind::COMMENT, r"(?<![^\s;&|()])#.*$"),
            Rule::token(TokenKind::COMMENT_DOC, r":\s+'(?=[^']*$)")
                .next(format!("{}{}", DOC_NAMESPACE, START_STATE)),
            Rule::token(TokenKind::STRING, r"'[^']*'"),
            Rule::token(TokenKind::STRING, r"'[^']*$").next(QSTRING),
            Rule::token(TokenKind::STRING, r#""(?:\\.|[^"\\])*""#),
            Rule::token(TokenKind::STRING, r#"".*$"#).next(QQSTRING),
            Rule::token(TokenKind::STRING_INTERPOLATED, r"`[^`]*`"),
            Rule::token(TokenKind::VARIABLE, r"\$\{[^}]*\}"),
            Rule::token(TokenKind::VARIABLE_LANGUAGE, r"\$[?$!#@*\-0-9]"),
            Rule::token(TokenKind::PAREN_LPAREN, r"\$\(\(?"),
            Rule::token(TokenKind::CONSTANT_NUMERIC, r"0[xX][0-9a-fA-F]+\b"),
            Rule::token(TokenKind::CONSTANT_NUMERIC, r"\d+\b"),
            Rule::classify(words.clone(), WORD_PATTERN),
            Rule::classify(words, RESERVED_PUNCT_PATTERN),
            Rule::token(
                TokenKind::KEYWORD_OPERATOR,
                r"&&|\|\||;;|<<-?|>>|[<>]&|&>|[|&;<>!=]",
            ),
            Rule::token(TokenKind::PAREN_LPAREN, r"[\[({]"),
            Rule::token(TokenKind::PAREN_RPAREN, r"[\])}]"),
            Rule::token(TokenKind::TEXT, r"\s+"),
        ],
    );
    table.add_state(
        QSTRING,
        vec![
            Rule::token(TokenKind::STRING, r"[^']*'").next(START_STATE),
            Rule::token(TokenKind::STRING, r".+"),
        ],
    )?;
    table.add_state(
        QQSTRING,
        vec![
            Rule::token(TokenKind::STRING, r#"(?:\\.|[^"\\])*""#).next(START_STATE),
            Rule::token(TokenKind::STRING, r".+"),
        ],
    )?;

    table.embed(
        &doc_comment::rules(),
        DOC_NAMESPACE,
        vec![Rule::token(TokenKind::COMMENT_DOC, "'").next(START_STATE)],
    )?;

    Ok(table)
}
