//! Token stream output
//!
//! Renders the tokens of a whole document in one of several formats:
//!
//! - `simple`: one token per row, `line:kind "text"` (plus the state after
//!   the token when requested)
//! - `json`: an array of token records
//! - `yaml`: the same records as YAML
//!
//! Records carry the 1-based line number, the kind, the token text and the
//! state name, so the output stays meaningful without the tokenizer at hand.

use crate::error::{ProcessingError, ProcessingResult};
use crate::tokenizer::{TokenizedLine, Tokenizer};
use serde::Serialize;
use std::str::FromStr;

/// Output format for token streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: &'static [OutputFormat] =
        &[OutputFormat::Simple, OutputFormat::Json, OutputFormat::Yaml];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| ProcessingError::InvalidFormat(s.to_string()))
    }
}

/// A serializable view of one token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRecord<'a> {
    pub line: usize,
    pub kind: &'static str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a str>,
}

/// Flatten tokenized lines into records.
pub fn records<'a>(
    tokenizer: &'a Tokenizer,
    lines: &[TokenizedLine<'a>],
    show_states: bool,
) -> Vec<TokenRecord<'a>> {
    lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            line.tokens.iter().map(move |token| TokenRecord {
                line: index + 1,
                kind: token.kind.as_str(),
                text: token.text,
                state: show_states.then(|| tokenizer.state_name(token.state)),
            })
        })
        .collect()
}

/// Tokenize `source` line by line and render it in `format`.
pub fn process(
    tokenizer: &Tokenizer,
    source: &str,
    format: OutputFormat,
    show_states: bool,
) -> ProcessingResult<String> {
    let lines = tokenizer.tokenize_lines(source);
    log::debug!("tokenized {} lines", lines.len());
    let records = records(tokenizer, &lines, show_states);

    match format {
        OutputFormat::Simple => Ok(render_simple(&records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&records)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&records)?),
    }
}

fn render_simple(records: &[TokenRecord<'_>]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&simple_row(record));
        out.push('\n');
    }
    out
}

fn simple_row(record: &TokenRecord<'_>) -> String {
    let row = format!("{}:{} {:?}", record.line, record.kind, record.text);
    match record.state {
        Some(state) => format!("{} {}", row, state),
        None => row,
    }
}
