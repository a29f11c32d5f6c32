use anyhow::Result;
use owo_colors::OwoColorize;

use daybook_core::coordinator::{AssistantOutcome, EventCoordinator};

pub async fn run(coordinator: &EventCoordinator, message: String) -> Result<()> {
    let outcome = coordinator.create_from_prompt(&message).await?;

    match outcome {
        AssistantOutcome::Created(event) => {
            println!("{}", format!("Created: {}", event.title).green());
        }
        AssistantOutcome::Updated(event) => {
            println!("{}", format!("Updated: {}", event.title).green());
        }
        AssistantOutcome::Deleted(id) => {
            println!("{}", format!("Deleted {}", id).green());
        }
        AssistantOutcome::Queried(events) => {
            if events.is_empty() {
                println!("{}", "No matching events".dimmed());
            }
            for event in &events {
                println!("  {}  {}", event.start.format("%Y-%m-%d %H:%M"), event.title);
            }
        }
        AssistantOutcome::Answer(reply) => {
            println!("{}", reply.unwrap_or_else(|| "(no reply)".to_string()));
        }
    }

    Ok(())
}
