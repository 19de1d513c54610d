//! `ask` subcommand: one query, one answer

use crate::cli::AskArgs;
use crate::config::AppConfig;
use crate::create_research_service;
use crate::domain::research::{CancelHandle, ReasoningTrace};
use crate::domain::DomainError;

pub async fn run(config: AppConfig, args: AskArgs) -> anyhow::Result<()> {
    let service = create_research_service(&config)?;

    let cancel = CancelHandle::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    match service.answer(&args.query, &cancel).await {
        Ok(answer) => {
            println!("{}", answer.answer);

            if answer.cached {
                println!(
                    "\n[served from cache, similarity {:.3}]",
                    answer.similarity.unwrap_or_default()
                );
            }

            if !answer.complete {
                println!("\n[research was cut short; this answer may be incomplete]");
            }

            if args.trace {
                print_trace(&answer.trace);
            }

            Ok(())
        }
        Err(error) => {
            let message = error.user_message();

            if matches!(error, DomainError::Cancelled) {
                println!("{}", message);
                return Ok(());
            }

            anyhow::bail!(message)
        }
    }
}

fn print_trace(trace: &ReasoningTrace) {
    if trace.is_empty() {
        println!("\n[no function calls were needed]");
        return;
    }

    println!("\nReasoning trace:");

    for iteration in &trace.iterations {
        println!("  iteration {} ({})", iteration.index + 1, iteration.summary);

        for call in &iteration.calls {
            let status = if call.is_failure() { "FAILED" } else { "ok" };
            println!("    {} {}({})", status, call.function, call.arguments);
        }
    }
}
