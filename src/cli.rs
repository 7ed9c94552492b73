use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::interpreter::executor::StdConsole;
use crate::interpreter::lexer::TokenStream;
use crate::interpreter::parser;
use crate::session::{Outcome, Session};

#[derive(Parser)]
#[command(name = "basic")]
#[command(about = "Line-numbered BASIC interpreter", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Repl,

    /// Load a program file and RUN it
    Run {
        /// File of numbered program lines
        file: PathBuf,
    },

    /// Load a program file and LIST it in line order
    List {
        /// File of numbered program lines
        file: PathBuf,
    },

    /// Parse one statement and print its syntax tree as JSON
    Parse {
        /// Statement text, with or without a leading line number
        line: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

/// Install the stderr log subscriber; RUST_LOG wins over the configured filter
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    // Ignore a second install (embedders may already have one)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Internal function that handles CLI commands
fn run_cli_with_args(cli: Cli) -> Result<()> {
    // Load configuration before anything else so errors show up first
    let config = Config::builder().config_path(cli.config).build()?;
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut session = new_session(config);
            session.run_repl().context("Console I/O failed")?;
        }

        Commands::Run { file } => {
            let source = read_program(&file)?;
            let mut session = new_session(config);
            if session.load(&source)? == Outcome::Quit {
                return Ok(());
            }
            session.handle_line("RUN")?;
        }

        Commands::List { file } => {
            let source = read_program(&file)?;
            let mut session = new_session(config);
            session.load(&source)?;
            session.handle_line("LIST")?;
        }

        Commands::Parse { line } => {
            let mut tokens = TokenStream::tokenize(&line)?;
            if tokens.peek().is_some_and(|t| t.is_number()) {
                tokens.next_token();
            }
            let stmt = parser::parse_statement(&mut tokens).map_err(|err| {
                anyhow::anyhow!("{} ({})", err, err.detail().unwrap_or("no detail"))
            })?;
            println!("{}", serde_json::to_string_pretty(&stmt)?);
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn new_session(config: Config) -> Session<StdConsole> {
    let console = StdConsole::with_input_prompt(config.input.prompt.clone());
    Session::new(console, config)
}

fn read_program(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))
}
