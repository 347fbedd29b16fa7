//! The line tokenizer
//!
//! A [`Tokenizer`] is a compiled [`RuleTable`]: state names are resolved to
//! [`StateId`]s and every pattern is compiled once. Tokenizing a line walks
//! the active state's rules in declaration order at the current offset and
//! takes the first rule that matches. There is no longest-match and no
//! backtracking across rules.
//!
//! ## Progress
//!
//! Every call terminates and the emitted token texts always concatenate back
//! to the input line:
//!
//! - a rule matching the empty string only fires if it was built with
//!   [`crate::Rule::zero_width`]; it switches state without emitting a token,
//!   and at most one zero-width match is taken per offset
//! - when nothing matches, one character is emitted as a `text` token
//! - after `max_tokens_per_line` tokens the rest of the line becomes a single
//!   `text` token and the state is kept
//!
//! ## Lines and state
//!
//! The state active at the end of a line is returned as
//! [`TokenizedLine::end_state`]. Feeding it into the next call resumes
//! multi-line constructs. A zero-width rule can never fire at the very end of
//! a line, since scanning stops once the input is consumed.
//!
//! ## Cost
//!
//! Each rule remembers where it next matches on the line while the state is
//! unchanged. A rule is searched again only once the scan has moved past that
//! position, so a line costs roughly one pass per rule rather than one pass
//! per rule per token. Searches still run over the whole line, so lookbehind
//! sees text left of the offset.

use crate::error::{GrammarError, GrammarResult};
use crate::rules::{RuleAction, RuleTable, START_STATE};
use crate::token::{StateId, Token, TokenKind};
use fancy_regex::Regex;
use std::fmt;

/// Tokens past this count on one line are folded into a single `text` token.
pub const DEFAULT_MAX_TOKENS_PER_LINE: usize = 2000;

struct CompiledRule {
    regex: Regex,
    action: RuleAction,
    next: Option<StateId>,
    zero_width: bool,
}

struct CompiledState {
    name: String,
    rules: Vec<CompiledRule>,
}

/// Where a rule next matches on the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextMatch {
    Unknown,
    At { start: usize, end: usize },
    Never,
}

/// Result of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine<'a> {
    pub tokens: Vec<Token<'a>>,
    pub end_state: StateId,
}

/// A compiled grammar, ready to tokenize lines.
///
/// Immutable once built; share it freely across threads. Callers own the
/// per-document end state and must feed lines of one document in order.
pub struct Tokenizer {
    states: Vec<CompiledState>,
    start: StateId,
    max_tokens_per_line: usize,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.states.iter().map(|s| s.name.as_str()).collect();
        f.debug_struct("Tokenizer")
            .field("states", &names)
            .field("max_tokens_per_line", &self.max_tokens_per_line)
            .finish()
    }
}

impl Tokenizer {
    /// Validate `table` and compile every state.
    pub fn new(table: &RuleTable) -> GrammarResult<Self> {
        table.validate()?;

        let names: Vec<&str> = table.state_names().collect();
        let resolve = |name: &str| {
            names
                .iter()
                .position(|candidate| *candidate == name)
                .map(StateId)
        };

        let mut states = Vec::with_capacity(table.len());
        let mut rule_count = 0;
        for (name, rules) in table.states() {
            let mut compiled = Vec::with_capacity(rules.len());
            for (index, rule) in rules.iter().enumerate() {
                let regex = Regex::new(&format!("(?m)(?:{})", rule.pattern)).map_err(|e| {
                    GrammarError::InvalidPattern {
                        state: name.to_string(),
                        rule: index,
                        pattern: rule.pattern.clone(),
                        message: e.to_string(),
                    }
                })?;
                // validate() guarantees every target resolves
                let next = match &rule.next {
                    Some(target) => Some(resolve(target).ok_or_else(|| {
                        GrammarError::UndefinedState {
                            from: name.to_string(),
                            rule: index,
                            target: target.clone(),
                        }
                    })?),
                    None => None,
                };
                compiled.push(CompiledRule {
                    regex,
                    action: rule.action.clone(),
                    next,
                    zero_width: rule.zero_width,
                });
            }
            rule_count += compiled.len();
            states.push(CompiledState {
                name: name.to_string(),
                rules: compiled,
            });
        }

        let start = resolve(START_STATE)
            .ok_or_else(|| GrammarError::MissingStartState(START_STATE.to_string()))?;

        log::debug!(
            "compiled tokenizer: {} states, {} rules",
            states.len(),
            rule_count
        );

        Ok(Self {
            states,
            start,
            max_tokens_per_line: DEFAULT_MAX_TOKENS_PER_LINE,
        })
    }

    /// Change the per-line token cap. A cap of zero is raised to one.
    pub fn with_max_tokens_per_line(mut self, max: usize) -> Self {
        self.max_tokens_per_line = max.max(1);
        self
    }

    pub fn max_tokens_per_line(&self) -> usize {
        self.max_tokens_per_line
    }

    /// The initial state, `start`.
    pub fn start_state(&self) -> StateId {
        self.start
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == name)
            .map(StateId)
    }

    /// Name of a state. Ids from another tokenizer that are out of range
    /// resolve to `start`.
    pub fn state_name(&self, id: StateId) -> &str {
        self.states
            .get(id.0)
            .map_or(START_STATE, |state| state.name.as_str())
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Tokenize one line, starting in `start` (or the initial state).
    pub fn tokenize<'a>(&self, line: &'a str, start: Option<StateId>) -> TokenizedLine<'a> {
        let mut state = match start {
            Some(id) if id.0 < self.states.len() => id,
            Some(id) => {
                log::debug!("unknown start state #{}, using start", id.0);
                self.start
            }
            None => self.start,
        };

        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut zero_width_at = None;
        let mut next_matches = Vec::new();
        self.reset_next_matches(state, &mut next_matches);

        while offset < line.len() {
            if tokens.len() + 1 >= self.max_tokens_per_line {
                log::trace!("token cap reached at offset {}", offset);
                tokens.push(Token::new(TokenKind::TEXT, &line[offset..], state));
                break;
            }

            let zero_width_taken = zero_width_at == Some(offset);
            match self.match_at(state, line, offset, zero_width_taken, &mut next_matches) {
                Some((rule, end)) => {
                    if let Some(next) = rule.next {
                        if next != state {
                            log::trace!(
                                "{} -> {} at offset {}",
                                self.state_name(state),
                                self.state_name(next),
                                offset
                            );
                            self.reset_next_matches(next, &mut next_matches);
                        }
                        state = next;
                    }
                    if end == offset {
                        zero_width_at = Some(offset);
                        continue;
                    }
                    let text = &line[offset..end];
                    tokens.push(Token::new(rule.action.kind_for(text), text, state));
                    offset = end;
                }
                None => {
                    let width = line[offset..].chars().next().map_or(1, char::len_utf8);
                    log::trace!(
                        "no rule in '{}' matches at offset {}",
                        self.state_name(state),
                        offset
                    );
                    tokens.push(Token::new(
                        TokenKind::TEXT,
                        &line[offset..offset + width],
                        state,
                    ));
                    offset += width;
                }
            }
        }

        TokenizedLine {
            tokens,
            end_state: state,
        }
    }

    /// Tokenize every line of `text`, threading each end state into the next
    /// line.
    pub fn tokenize_lines<'a>(&self, text: &'a str) -> Vec<TokenizedLine<'a>> {
        let mut state = self.start;
        text.lines()
            .map(|line| {
                let tokenized = self.tokenize(line, Some(state));
                state = tokenized.end_state;
                tokenized
            })
            .collect()
    }

    fn reset_next_matches(&self, state: StateId, next_matches: &mut Vec<NextMatch>) {
        next_matches.clear();
        next_matches.resize(self.states[state.0].rules.len(), NextMatch::Unknown);
    }

    /// First rule of `state` matching exactly at `offset`, with its match end.
    ///
    /// `next_matches` holds one entry per rule of `state`. A leftmost search
    /// from an earlier offset that found a match starting at or after
    /// `offset` proves no match starts in between, so that entry is reused.
    fn match_at(
        &self,
        state: StateId,
        line: &str,
        offset: usize,
        zero_width_taken: bool,
        next_matches: &mut [NextMatch],
    ) -> Option<(&CompiledRule, usize)> {
        let rules = &self.states[state.0].rules;
        for (rule, next) in rules.iter().zip(next_matches.iter_mut()) {
            let (start, end) = match *next {
                NextMatch::Never => continue,
                NextMatch::At { start, end } if start >= offset => (start, end),
                _ => {
                    *next = search(rule, line, offset);
                    match *next {
                        NextMatch::At { start, end } => (start, end),
                        _ => continue,
                    }
                }
            };
            if start != offset {
                continue;
            }
            if end == offset && (!rule.zero_width || zero_width_taken) {
                continue;
            }
            return Some((rule, end));
        }
        None
    }
}

/// Leftmost match of `rule` starting at or after `offset`.
fn search(rule: &CompiledRule, line: &str, offset: usize) -> NextMatch {
    match rule.regex.find_from_pos(line, offset) {
        Ok(Some(found)) => NextMatch::At {
            start: found.start(),
            end: found.end(),
        },
        Ok(None) => NextMatch::Never,
        Err(e) => {
            // backtrack limit; the rule sits out the rest of the line
            log::debug!("pattern /{}/ failed: {}", rule.regex.as_str(), e);
            NextMatch::Never
        }
    }
}
