use anyhow::Result;
use owo_colors::OwoColorize;
use uuid::Uuid;

use daybook_core::coordinator::EventCoordinator;

use super::parse_datetime;

pub fn run(
    coordinator: &EventCoordinator,
    start: String,
    end: String,
    exclude: Option<Uuid>,
) -> Result<()> {
    let start = parse_datetime(&start)?;
    let end = parse_datetime(&end)?;

    let conflicts = coordinator.detect_conflicts(start, end, exclude);
    if conflicts.is_empty() {
        println!("{}", "No conflicts".green());
        return Ok(());
    }

    println!("{}", format!("{} conflicting event(s):", conflicts.len()).yellow());
    for event in &conflicts {
        println!(
            "  {} - {}  {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%H:%M"),
            event.title,
        );
    }

    Ok(())
}
