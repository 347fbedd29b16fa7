//! Property-based tests for the tokenizer
//!
//! These check the guarantees every grammar gets from the engine: tokens
//! always concatenate back to the input, results are deterministic, zero-width
//! rules cannot stall the scan, and line-by-line tokenizing agrees with
//! tokenizing the joined text.

use proptest::prelude::*;
use rulelex::{grammars, Rule, RuleTable, StateId, TokenKind, Tokenizer, TokenizedLine};

fn joined(line: &TokenizedLine<'_>) -> String {
    line.tokens.iter().map(|token| token.text).collect()
}

fn state_ids(tokenizer: &Tokenizer) -> Vec<StateId> {
    let mut ids = Vec::new();
    let mut names = Vec::new();
    for name in ["start", "qstring", "qqstring", "doc-start"] {
        if let Some(id) = tokenizer.state_id(name) {
            ids.push(id);
            names.push(name);
        }
    }
    assert_eq!(ids.len(), tokenizer.state_count(), "states: {:?}", names);
    ids
}

/// A grammar whose zero-width rules would loop forever without the engine's
/// one-zero-width-match-per-offset limit.
fn ping_pong() -> Tokenizer {
    let mut table = RuleTable::new();
    table
        .add_state(
            "start",
            vec![
                Rule::token(TokenKind::TEXT, "(?=[a-z])").next("word").zero_width(),
                Rule::token(TokenKind::TEXT, "(?=.)").next("other").zero_width(),
                Rule::token(TokenKind::CONSTANT_NUMERIC, r"\d+"),
            ],
        )
        .unwrap();
    table
        .add_state(
            "word",
            vec![
                Rule::token(TokenKind::TEXT, "").next("start").zero_width(),
                Rule::token(TokenKind::IDENTIFIER, "[a-z]+").next("start"),
            ],
        )
        .unwrap();
    table
        .add_state(
            "other",
            vec![Rule::token(TokenKind::TEXT, "(?=.)").next("start").zero_width()],
        )
        .unwrap();
    table.compile().unwrap()
}

/// Single-line grammar: nothing can span a newline, and `\n` has its own rule.
fn single_line() -> Tokenizer {
    let mut table = RuleTable::new();
    table
        .add_state(
            "start",
            vec![
                Rule::token(TokenKind::COMMENT, "#.*$"),
                Rule::token(TokenKind::STRING, r"'[^'\n]*'"),
                Rule::token(TokenKind::IDENTIFIER, r"[a-z0-9]+"),
                Rule::token(TokenKind::TEXT, r"[ \t]+"),
                Rule::token(TokenKind::TEXT, r"\n"),
            ],
        )
        .unwrap();
    table.compile().unwrap()
}

fn shell_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z_][a-zA-Z0-9_]{0,6}",
            "\\$[a-zA-Z?#@!$0-9{}()]{0,4}",
            "[ \t]{1,3}",
            "['\"`#:;|&<>!=(){}\\[\\]\\\\]",
            "[0-9]{1,4}",
            "@[a-z]{1,5}",
            "\\PC{0,3}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_concatenate_to_input(line in shell_text()) {
        let tokenizer = grammars::lookup("sh").unwrap();
        for state in state_ids(&tokenizer) {
            let result = tokenizer.tokenize(&line, Some(state));
            prop_assert_eq!(joined(&result), line.clone());
            prop_assert!(result.tokens.iter().all(|token| !token.is_empty()));
        }
    }

    #[test]
    fn arbitrary_unicode_is_total(line in any::<String>()) {
        let tokenizer = grammars::lookup("sh").unwrap();
        let result = tokenizer.tokenize(&line, None);
        prop_assert_eq!(joined(&result), line);
    }

    #[test]
    fn tokenizing_is_deterministic(line in shell_text(), state_index in 0usize..4) {
        let tokenizer = grammars::lookup("sh").unwrap();
        let states = state_ids(&tokenizer);
        let state = states[state_index % states.len()];
        let first = tokenizer.tokenize(&line, Some(state));
        let second = tokenizer.tokenize(&line, Some(state));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn zero_width_rules_cannot_stall(line in "\\PC{0,40}") {
        let tokenizer = ping_pong();
        let result = tokenizer.tokenize(&line, None);
        prop_assert_eq!(joined(&result), line);
    }

    #[test]
    fn token_cap_keeps_totality(line in shell_text(), cap in 1usize..6) {
        let tokenizer = grammars::rules("sh")
            .unwrap()
            .compile()
            .unwrap()
            .with_max_tokens_per_line(cap);
        let result = tokenizer.tokenize(&line, None);
        prop_assert!(result.tokens.len() <= cap);
        prop_assert_eq!(joined(&result), line);
    }

    #[test]
    fn state_carries_over_lines(
        first in "[a-z0-9 #']{0,16}",
        second in "[a-z0-9 #']{0,16}",
    ) {
        let tokenizer = single_line();
        let line1 = tokenizer.tokenize(&first, None);
        let line2 = tokenizer.tokenize(&second, Some(line1.end_state));

        let text = format!("{}\n{}", first, second);
        let whole = tokenizer.tokenize(&text, None);

        let mut expected: Vec<(TokenKind, &str)> =
            line1.tokens.iter().map(|t| (t.kind, t.text)).collect();
        expected.push((TokenKind::TEXT, "\n"));
        expected.extend(line2.tokens.iter().map(|t| (t.kind, t.text)));
        let actual: Vec<(TokenKind, &str)> =
            whole.tokens.iter().map(|t| (t.kind, t.text)).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(whole.end_state, line2.end_state);
    }
}

#[test]
fn open_string_continues_on_next_line() {
    let tokenizer = grammars::lookup("sh").unwrap();
    let first = tokenizer.tokenize("x='one", None);
    assert_eq!(tokenizer.state_name(first.end_state), "qstring");

    // would be a comment if lexed from start
    let second = tokenizer.tokenize("# two' y", Some(first.end_state));
    assert_eq!(second.tokens[0].kind, TokenKind::STRING);
    assert_eq!(second.tokens[0].text, "# two'");
    assert_eq!(second.end_state, tokenizer.start_state());
}
