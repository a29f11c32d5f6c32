use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use owo_colors::OwoColorize;

use daybook_core::coordinator::EventCoordinator;

use super::parse_datetime;

pub fn run(
    coordinator: &EventCoordinator,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let now = Utc::now();
    let from = match from {
        Some(s) => parse_datetime(&s)?,
        None => now,
    };
    let to = match to {
        Some(s) => parse_datetime(&s)?,
        None => now + Duration::days(7),
    };

    let events = coordinator.events_in_range(from, to);
    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Group events by day and print
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        let date = event.start.date_naive();
        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date.format("%a %b %-d").to_string().bold());
            current_date = Some(date);
        }

        let time = if event.all_day {
            "all-day".to_string()
        } else {
            format!("{:>7}", event.start.format("%H:%M"))
        };
        println!("  {} {} {}", time, event.title, format!("[{}]", event.id).dimmed());
    }

    Ok(())
}
