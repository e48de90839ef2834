use owo_colors::OwoColorize;

use crate::catalog::{CatalogItem, Generation};

/// Format an element type as a colored `[type]` badge
pub fn format_type_badge(name: &str) -> String {
    format_type_badge_with_format(name, |s| format!("[{s}]"))
}

pub fn format_type_badge_with_format<F>(name: &str, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(name);
    match name {
        "fire" | "fighting" => badge.red().to_string(),
        "water" | "ice" => badge.blue().to_string(),
        "grass" | "bug" => badge.green().to_string(),
        "electric" | "ground" => badge.yellow().to_string(),
        "psychic" | "fairy" => badge.magenta().to_string(),
        "poison" | "ghost" | "dragon" => badge.purple().to_string(),
        "flying" => badge.cyan().to_string(),
        "rock" | "steel" => badge.white().to_string(),
        "dark" => badge.bright_black().to_string(),
        _ => badge.dimmed().to_string(),
    }
}

/// All type badges of an item, space separated
pub fn format_type_badges(item: &CatalogItem) -> String {
    item.type_names()
        .into_iter()
        .map(format_type_badge)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an item for single-line list display with colors
pub fn format_item_line(item: &CatalogItem) -> String {
    let generation = Generation::containing(item.id)
        .map(|g| format!(" ({})", g.numeral()))
        .unwrap_or_default();
    format!(
        "{} {:<16} {}{}",
        item.display_id().cyan(),
        item.name,
        format_type_badges(item),
        generation.dimmed()
    )
}

/// Mark a filter control as on or off
pub fn format_toggle(label: &str, active: bool) -> String {
    if active {
        format!("[x] {label}").green().to_string()
    } else {
        format!("[ ] {label}").dimmed().to_string()
    }
}
