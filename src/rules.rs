//! Declarative grammar tables
//!
//! Grammars are built from [`Rule`]s grouped into named states inside a
//! [`RuleTable`]. Tables are composed at build time (seeding from a base
//! table, overriding states, embedding other tables through [`Embedding`])
//! and then compiled once into a [`crate::Tokenizer`].

pub mod embed;
pub mod rule;
pub mod table;

pub use embed::{Embedding, ExitPlacement};
pub use rule::{Rule, RuleAction};
pub use table::{RuleTable, START_STATE};
