//! Command-line interface for rulelex
//! Tokenizes a file (or stdin) line by line with a built-in grammar and
//! prints the token stream.
//!
//! Usage:
//!   rulelex `<path>` [--grammar `<name>`] [--format `<format>`] [--states]
//!   rulelex - < script.sh                 - Read from stdin
//!   rulelex --list-grammars               - List the built-in grammars

use clap::Parser;
use rulelex::config::{Loader, RulelexConfig};
use rulelex::error::ProcessingResult;
use rulelex::processor::{process, OutputFormat};
use rulelex::{grammars, Tokenizer};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use stderrlog::Timestamp;

#[derive(Parser, Debug)]
#[command(
    name = "rulelex",
    version,
    about = "Tokenize source text with a rule-driven highlighting grammar",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to the file to tokenize, or '-' for stdin
    #[arg(required_unless_present = "list_grammars")]
    path: Option<String>,

    /// Grammar to use (default from config: sh)
    #[arg(short, long)]
    grammar: Option<String>,

    /// Output format: simple, json or yaml
    #[arg(short, long)]
    format: Option<String>,

    /// Show the state active after each token
    #[arg(long)]
    states: bool,

    /// Extra configuration file layered over the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List the built-in grammars
    #[arg(long)]
    list_grammars: bool,

    #[command(flatten)]
    logging: LogArgs,
}

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
struct LogArgs {
    /// Silence log messages.
    #[arg(short, long)]
    quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable timestamped logging.
    #[arg(long)]
    ts: bool,
}

impl LogArgs {
    fn setup_logging(&self) -> Result<(), log::SetLoggerError> {
        let level = match self.verbose {
            0 => stderrlog::LogLevelNum::Warn,
            1 => stderrlog::LogLevelNum::Info,
            2 => stderrlog::LogLevelNum::Debug,
            _ => stderrlog::LogLevelNum::Trace,
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(level)
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.logging.setup_logging() {
        eprintln!("Error setting up logging: {}", e);
    }

    if cli.list_grammars {
        handle_list_grammars_command();
        return;
    }

    if let Err(e) = handle_tokenize_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> ProcessingResult<RulelexConfig> {
    let mut loader = Loader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    if let Some(grammar) = &cli.grammar {
        loader = loader.set_override("grammar", grammar.as_str())?;
    }
    if let Some(format) = &cli.format {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if cli.states {
        loader = loader.set_override("output.show_states", true)?;
    }
    Ok(loader.build()?)
}

/// Shared tokenizer, unless the config asks for a different token cap.
fn build_tokenizer(config: &RulelexConfig) -> ProcessingResult<Arc<Tokenizer>> {
    let shared = grammars::lookup(&config.grammar)?;
    let cap = config.tokenizer.max_tokens_per_line;
    if shared.max_tokens_per_line() == cap {
        return Ok(shared);
    }
    log::info!("compiling '{}' with a cap of {} tokens", config.grammar, cap);
    let tokenizer = grammars::rules(&config.grammar)?
        .compile()?
        .with_max_tokens_per_line(cap);
    Ok(Arc::new(tokenizer))
}

fn read_source(path: &str) -> ProcessingResult<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Handle the default command: tokenize and print
fn handle_tokenize_command(cli: &Cli) -> ProcessingResult<()> {
    let config = load_config(cli)?;
    let format: OutputFormat = config.output.format.parse()?;
    let tokenizer = build_tokenizer(&config)?;

    // clap guarantees a path unless --list-grammars was given
    let path = cli.path.as_deref().unwrap_or("-");
    let source = read_source(path)?;
    log::debug!("read {} bytes from {}", source.len(), path);

    let output = process(&tokenizer, &source, format, config.output.show_states)?;
    print!("{}", output);
    Ok(())
}

/// Handle the --list-grammars command
fn handle_list_grammars_command() {
    println!("Available grammars:\n");
    for name in grammars::NAMES {
        match grammars::lookup(name) {
            Ok(tokenizer) => println!("  {} ({} states)", name, tokenizer.state_count()),
            Err(e) => println!("  {} (broken: {})", name, e),
        }
    }
}
