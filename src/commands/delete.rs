use anyhow::Result;
use owo_colors::OwoColorize;
use uuid::Uuid;

use daybook_core::coordinator::EventCoordinator;

pub fn run(coordinator: &EventCoordinator, id: Uuid) -> Result<()> {
    coordinator.delete(id)?;
    println!("{}", format!("Deleted {}", id).green());
    Ok(())
}
