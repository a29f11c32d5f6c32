use anyhow::Result;
use chrono::Duration;
use owo_colors::OwoColorize;

use daybook_core::EventDraft;
use daybook_core::coordinator::EventCoordinator;

use super::parse_datetime;

pub fn run(
    coordinator: &EventCoordinator,
    title: String,
    start: String,
    end: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let start = parse_datetime(&start)?;
    let end = match end {
        Some(e) => parse_datetime(&e)?,
        None => start + Duration::hours(1),
    };

    // Double-bookings are warnings, never blockers
    let conflicts = coordinator.detect_conflicts(start, end, None);

    let mut draft = EventDraft::new(title, start, end);
    draft.location = location;
    let event = coordinator.create(draft)?;

    println!("{}", format!("Created: {}", event.title).green());
    for conflict in &conflicts {
        println!(
            "  {} overlaps \"{}\" ({} - {})",
            "warning:".yellow(),
            conflict.title,
            conflict.start.format("%H:%M"),
            conflict.end.format("%H:%M"),
        );
    }

    Ok(())
}
