//! `tools` subcommand: list the registered domain-data functions

use crate::infrastructure::pokeapi::builtin_registry;

pub fn run() -> anyhow::Result<()> {
    let registry = builtin_registry()?;

    println!("{} registered functions:\n", registry.len());
    println!("{}", registry.render_for_prompt());

    Ok(())
}
