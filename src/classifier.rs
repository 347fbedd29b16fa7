//! Word classification
//!
//! Some lexical categories cannot be told apart by a regex alone: `done`,
//! `echo`, `$HOME` and `$name` all look like words. Rules for such words
//! carry a [`Classify`] implementation instead of a fixed kind, and the
//! tokenizer asks it for the kind of each matched lexeme.
//!
//! [`WordClassifier`] is the standard implementation: an ordered list of
//! [`Tier`]s consulted first-match-wins, with a fallback kind when no tier
//! claims the word. Classification depends on the lexeme text only.
//!
//! The standard order built by [`WordClassifier::standard`] is:
//!
//! 1. reserved keywords → `keyword`
//! 2. builtin constants → `constant.language`
//! 3. builtin variables → `variable.language`
//! 4. future reserved words → `invalid.illegal`
//! 5. builtin functions → `support.function`
//! 6. the deprecated literal → `invalid.deprecated`
//! 7. sigil pattern or contextual keywords → `variable`
//! 8. anything else → `identifier`
//!
//! New categories go in as new tiers ([`WordClassifier::insert_tier_before`],
//! [`WordClassifier::insert_tier_after`]). Existing tiers cannot be edited,
//! which keeps every earlier classification decision stable.

use crate::error::{GrammarError, GrammarResult};
use crate::token::TokenKind;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Maps a matched lexeme to a token kind.
pub trait Classify: Send + Sync {
    fn classify(&self, lexeme: &str) -> TokenKind;
}

impl<F> Classify for F
where
    F: Fn(&str) -> TokenKind + Send + Sync,
{
    fn classify(&self, lexeme: &str) -> TokenKind {
        self(lexeme)
    }
}

/// How a tier decides membership.
#[derive(Debug, Clone)]
pub enum TierTest {
    /// Exact membership in a word set.
    Words(HashSet<&'static str>),
    /// Exact equality with one literal.
    Literal(&'static str),
    /// Full match against a pattern, or membership in a set of extra literals.
    Pattern {
        regex: Regex,
        literals: HashSet<&'static str>,
    },
}

impl TierTest {
    pub fn words(words: &[&'static str]) -> Self {
        TierTest::Words(words.iter().copied().collect())
    }

    /// Pattern tier; `pattern` is anchored on both ends.
    pub fn pattern(pattern: &str, literals: &[&'static str]) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(TierTest::Pattern {
            regex,
            literals: literals.iter().copied().collect(),
        })
    }

    fn matches(&self, lexeme: &str) -> bool {
        match self {
            TierTest::Words(words) => words.contains(lexeme),
            TierTest::Literal(literal) => *literal == lexeme,
            TierTest::Pattern { regex, literals } => {
                literals.contains(lexeme) || regex.is_match(lexeme)
            }
        }
    }
}

/// One priority level of a [`WordClassifier`].
#[derive(Debug, Clone)]
pub struct Tier {
    pub kind: TokenKind,
    pub test: TierTest,
}

impl Tier {
    pub fn new(kind: TokenKind, test: TierTest) -> Self {
        Self { kind, test }
    }
}

/// Word lists feeding [`WordClassifier::standard`].
#[derive(Debug, Clone, Default)]
pub struct LookupSets {
    pub keywords: &'static [&'static str],
    pub constants: &'static [&'static str],
    pub variables: &'static [&'static str],
    pub future_reserved: &'static [&'static str],
    pub functions: &'static [&'static str],
    pub deprecated: Option<&'static str>,
    /// Regex for sigil-prefixed variables, e.g. `\$[a-zA-Z_][a-zA-Z0-9_]*`.
    pub sigil_pattern: Option<&'static str>,
    /// Literal words that classify like sigil variables (`self`, `parent`).
    pub contextual: &'static [&'static str],
}

/// Priority-ordered lookup classifier.
#[derive(Clone)]
pub struct WordClassifier {
    tiers: Vec<Tier>,
    fallback: TokenKind,
}

impl fmt::Debug for WordClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordClassifier")
            .field("tiers", &self.tier_kinds())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl WordClassifier {
    /// A classifier with no tiers, returning `fallback` for every word.
    pub fn new(fallback: TokenKind) -> Self {
        Self {
            tiers: Vec::new(),
            fallback,
        }
    }

    /// Build the eight-tier standard order from `sets`.
    ///
    /// Fails only if `sets.sigil_pattern` is not a valid regex.
    pub fn standard(sets: &LookupSets) -> GrammarResult<Self> {
        let mut classifier = WordClassifier::new(TokenKind::IDENTIFIER)
            .with_tier(Tier::new(TokenKind::KEYWORD, TierTest::words(sets.keywords)))
            .with_tier(Tier::new(
                TokenKind::CONSTANT_LANGUAGE,
                TierTest::words(sets.constants),
            ))
            .with_tier(Tier::new(
                TokenKind::VARIABLE_LANGUAGE,
                TierTest::words(sets.variables),
            ))
            .with_tier(Tier::new(
                TokenKind::INVALID_ILLEGAL,
                TierTest::words(sets.future_reserved),
            ))
            .with_tier(Tier::new(
                TokenKind::SUPPORT_FUNCTION,
                TierTest::words(sets.functions),
            ));

        if let Some(deprecated) = sets.deprecated {
            classifier = classifier.with_tier(Tier::new(
                TokenKind::INVALID_DEPRECATED,
                TierTest::Literal(deprecated),
            ));
        }

        let variable_test = match sets.sigil_pattern {
            Some(pattern) => TierTest::pattern(pattern, sets.contextual).map_err(|e| {
                GrammarError::InvalidWordPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                }
            })?,
            None => TierTest::words(sets.contextual),
        };
        Ok(classifier.with_tier(Tier::new(TokenKind::VARIABLE, variable_test)))
    }

    /// Append a tier with the lowest priority so far.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Insert `tier` directly above the first tier producing `kind`.
    ///
    /// Returns the tier back if no tier produces `kind`.
    pub fn insert_tier_before(&mut self, kind: TokenKind, tier: Tier) -> Result<(), Tier> {
        match self.position_of(kind) {
            Some(index) => {
                self.tiers.insert(index, tier);
                Ok(())
            }
            None => Err(tier),
        }
    }

    /// Insert `tier` directly below the first tier producing `kind`.
    pub fn insert_tier_after(&mut self, kind: TokenKind, tier: Tier) -> Result<(), Tier> {
        match self.position_of(kind) {
            Some(index) => {
                self.tiers.insert(index + 1, tier);
                Ok(())
            }
            None => Err(tier),
        }
    }

    /// Tier kinds in priority order, fallback last.
    pub fn tier_kinds(&self) -> Vec<TokenKind> {
        self.tiers
            .iter()
            .map(|tier| tier.kind)
            .chain(std::iter::once(self.fallback))
            .collect()
    }

    pub fn fallback(&self) -> TokenKind {
        self.fallback
    }

    fn position_of(&self, kind: TokenKind) -> Option<usize> {
        self.tiers.iter().position(|tier| tier.kind == kind)
    }
}

impl Classify for WordClassifier {
    fn classify(&self, lexeme: &str) -> TokenKind {
        self.tiers
            .iter()
            .find(|tier| tier.test.matches(lexeme))
            .map(|tier| tier.kind)
            .unwrap_or(self.fallback)
    }
}
