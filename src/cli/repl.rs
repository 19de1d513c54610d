//! `repl` subcommand: interactive research session
//!
//! Each line is an independent query; there is no conversational memory.
//! Meta commands: `:stats`, `:clear`, `quit`.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::AppConfig;
use crate::create_research_service;
use crate::domain::research::CancelHandle;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let service = create_research_service(&config)?;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = tokio::io::stdout();

    println!("Pokemon research agent. Ask a question, or 'quit' to exit.");

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let query = line.trim();

        match query {
            "" => continue,
            "quit" | "exit" | "q" => break,
            ":stats" => {
                let stats = service.cache_stats().await?;
                println!(
                    "cache: {} entries, {} hits, {} misses, {} deduplicated, hit rate {:.1}%",
                    stats.total_entries,
                    stats.hits,
                    stats.misses,
                    stats.deduplicated,
                    stats.hit_rate() * 100.0
                );
            }
            ":clear" => {
                service.clear_cache().await?;
                println!("cache cleared");
            }
            _ => match service.answer(query, &CancelHandle::new()).await {
                Ok(answer) => {
                    println!("{}", answer.answer);

                    if answer.cached {
                        println!(
                            "[served from cache, similarity {:.3}]",
                            answer.similarity.unwrap_or_default()
                        );
                    } else if !answer.complete {
                        println!("[research was cut short; this answer may be incomplete]");
                    }
                }
                Err(error) => {
                    println!("{}", error.user_message());
                }
            },
        }
    }

    Ok(())
}
