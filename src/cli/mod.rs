//! CLI module for the Pokemon research agent
//!
//! Subcommands:
//! - `ask`: answer a single research question
//! - `repl`: interactive research session
//! - `tools`: list the registered domain-data functions

pub mod ask;
pub mod repl;
pub mod tools;

use clap::{Args, Parser, Subcommand};

/// Agentic Pokemon research with semantic query caching
#[derive(Parser)]
#[command(name = "poke-research")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Answer a single research question
    Ask(AskArgs),

    /// Interactive research session
    Repl,

    /// List the registered domain-data functions
    Tools,
}

#[derive(Args)]
pub struct AskArgs {
    /// The research question
    pub query: String,

    /// Print the reasoning trace after the answer
    #[arg(long)]
    pub trace: bool,
}
