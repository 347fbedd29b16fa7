//! Error types
//!
//! Two domains exist. [`GrammarError`] covers authoring defects found while a
//! rule table is composed or compiled; these block a grammar from being used
//! at all. [`ProcessingError`] covers the I/O and formatting work done around
//! the tokenizer by the processor, config loader and CLI.
//!
//! Tokenizing itself has no error type: unmatched input degrades to `text`
//! tokens.

/// Defects in a rule table, reported when it is composed or compiled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    /// A rule transitions to a state that does not exist.
    #[error("state '{from}' has a rule (#{rule}) moving to undefined state '{target}'")]
    UndefinedState {
        /// State holding the offending rule.
        from: String,
        /// Index of the rule within that state.
        rule: usize,
        /// The missing target.
        target: String,
    },

    /// The table has no `start` state.
    #[error("rule table has no '{0}' state")]
    MissingStartState(String),

    /// A state was added twice.
    #[error("state '{0}' is already defined")]
    DuplicateState(String),

    /// An embedded state would overwrite a host state.
    #[error("embedding under '{namespace}' collides with existing state '{state}'")]
    NamespaceCollision {
        /// Namespace the donor was embedded under.
        namespace: String,
        /// Prefixed state name that already existed.
        state: String,
    },

    /// An operation named a state the table does not have.
    #[error("unknown state '{0}'")]
    UnknownState(String),

    /// A rule pattern failed to compile.
    #[error("state '{state}' rule #{rule}: invalid pattern /{pattern}/: {message}")]
    InvalidPattern {
        /// State holding the rule.
        state: String,
        /// Index of the rule within that state.
        rule: usize,
        /// The pattern as written.
        pattern: String,
        /// Message from the regex engine.
        message: String,
    },

    /// A word classifier pattern failed to compile.
    #[error("invalid word pattern /{pattern}/: {message}")]
    InvalidWordPattern {
        /// The pattern as written.
        pattern: String,
        /// Message from the regex engine.
        message: String,
    },
}

/// Result type for grammar composition and compilation.
pub type GrammarResult<T> = Result<T, GrammarError>;

/// Errors raised around tokenization: grammar lookup, output and config.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// No built-in grammar has this name.
    #[error("unknown grammar '{0}'")]
    UnknownGrammar(String),

    /// Output format string could not be parsed.
    #[error("invalid output format '{0}' (expected one of: simple, json, yaml)")]
    InvalidFormat(String),

    /// Reading input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON or YAML serialization failed.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ::config::ConfigError),

    /// A grammar failed to compile.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl From<serde_json::Error> for ProcessingError {
    fn from(err: serde_json::Error) -> Self {
        ProcessingError::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for ProcessingError {
    fn from(err: serde_yaml::Error) -> Self {
        ProcessingError::Serialize(err.to_string())
    }
}

/// Result type for processing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;
