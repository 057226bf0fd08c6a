//! Plain-text rendering of plants.

use chrono::{DateTime, Utc};

use garden_shared::Plant;

pub const EMPTY_COLLECTION: &str = "You have no plants yet. Add your first plant!";
pub const NO_SEARCH_RESULTS: &str = "No plants found matching your search.";

/// Plants whose name or species contains `term`, ignoring case. A blank term
/// matches everything.
pub fn filter_plants<'a>(plants: &'a [Plant], term: &str) -> Vec<&'a Plant> {
    let term = term.trim().to_lowercase();
    plants
        .iter()
        .filter(|p| {
            term.is_empty()
                || p.name.to_lowercase().contains(&term)
                || p.species.to_lowercase().contains(&term)
        })
        .collect()
}

/// `Today`, `Yesterday` or `N days ago`, counting whole days in either
/// direction between `last_watered` and `now`.
pub fn format_last_watered(last_watered: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - last_watered).num_milliseconds().abs() / (24 * 60 * 60 * 1000);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}

pub fn render_card(plant: &Plant, now: DateTime<Utc>) -> String {
    let mut card = format!("#{} {}", plant.id, plant.name);
    if !plant.species.is_empty() {
        card.push_str(&format!(" ({})", plant.species));
    }
    card.push_str(&format!(
        "\n  Health: {}  Sunlight: {}  Water every {} day{}",
        plant.health,
        plant.sunlight,
        plant.watering_frequency,
        if plant.watering_frequency == 1 { "" } else { "s" }
    ));
    card.push_str(&format!(
        "\n  Last watered: {}",
        format_last_watered(plant.last_watered, now)
    ));
    if !plant.notes.is_empty() {
        card.push_str(&format!("\n  Notes: {}", plant.notes));
    }
    card
}

/// Cards for the plants matching `term`, or the appropriate empty message.
pub fn render_list(plants: &[Plant], term: &str, now: DateTime<Utc>) -> String {
    let matches = filter_plants(plants, term);
    if matches.is_empty() {
        return if term.trim().is_empty() {
            EMPTY_COLLECTION.to_string()
        } else {
            NO_SEARCH_RESULTS.to_string()
        };
    }
    matches
        .into_iter()
        .map(|p| render_card(p, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn error_banner(message: &str) -> String {
    format!("Error loading plants: {message}\nPlease make sure the backend server is running.")
}
