use clap::Parser;
use poke_research::cli::{self, Cli, Command};
use poke_research::infrastructure::logging::init_logging;
use poke_research::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    init_logging(&config.logging);

    match cli.command {
        Command::Ask(args) => cli::ask::run(config, args).await,
        Command::Repl => cli::repl::run(config).await,
        Command::Tools => cli::tools::run(),
    }
}
