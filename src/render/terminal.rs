//! Colored line-oriented presenter for the interactive browser.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use super::presenter::{FilterControl, Presenter, TooltipAnchor};
use crate::catalog::CatalogItem;
use crate::detail::{DetailRecord, MoveColumn};
use crate::display::{format_item_line, format_toggle, format_type_badges};

/// A row in the move table
#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Move")]
    name: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "PP")]
    pp: String,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Damage Class")]
    damage_class: String,
}

pub struct TerminalPresenter<W: Write> {
    out: W,
    /// Entries rendered since the last `clear_list`
    listed: usize,
    /// Load-more hint printed after the latest entries
    hint_shown: bool,
}

impl TerminalPresenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            listed: 0,
            hint_shown: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        if let Err(e) = writeln!(self.out, "{text}") {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush terminal");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn clear_list(&mut self) {
        if self.listed > 0 {
            self.line("─".repeat(40).dimmed());
        }
        self.listed = 0;
        self.hint_shown = false;
    }

    fn append_list(&mut self, items: &[&CatalogItem]) {
        for item in items {
            self.line(format_item_line(item));
        }
        self.listed += items.len();
        self.hint_shown = false;
        self.flush();
    }

    fn set_load_more(&mut self, visible: bool) {
        if visible && !self.hint_shown {
            self.line(format!("  ... {} shown, type 'more' for the next page", self.listed).dimmed());
            self.flush();
        }
        self.hint_shown = visible;
    }

    fn show_list_view(&mut self) {
        self.line(format!("{} {} entries shown", "List view:".bold(), self.listed));
        self.flush();
    }

    fn show_detail(&mut self, record: &DetailRecord) {
        let item = &record.item;
        self.line("");
        self.line(format!("{} {}", item.name.bold(), item.display_id().cyan()));
        if let Some(url) = item.image_url() {
            self.line(format!("Image: {}", url.dimmed()));
        }
        self.line(format!("Types: {}", format_type_badges(item)));
        self.line(format!(
            "Height: {:.1} m   Weight: {:.1} kg",
            item.height_m(),
            item.weight_kg()
        ));

        self.line("");
        self.line("Base Stats".bold());
        for stat in &item.stats {
            self.line(format!("  {:<16} {:>3}", stat.stat.name, stat.base_stat));
        }

        self.line("");
        self.line("Abilities".bold());
        for (index, ability) in record.abilities.iter().enumerate() {
            let hidden = if ability.hidden {
                format!(" {}", "(hidden)".dimmed())
            } else {
                String::new()
            };
            self.line(format!("  {}. {}{}", index + 1, ability.name, hidden));
        }

        self.line("");
        self.line("Moves".bold());
        if record.moves.is_empty() {
            self.line("  No moves available.");
        } else {
            let rows: Vec<MoveRow> = record
                .moves
                .iter()
                .enumerate()
                .map(|(index, m)| MoveRow {
                    index: index + 1,
                    name: m.name.clone(),
                    level: m.cell(MoveColumn::Level),
                    power: m.cell(MoveColumn::Power),
                    accuracy: m.cell(MoveColumn::Accuracy),
                    pp: m.cell(MoveColumn::Pp),
                    type_name: m.cell(MoveColumn::Type),
                    damage_class: m.cell(MoveColumn::DamageClass),
                })
                .collect();

            let mut table = Table::new(rows);
            table.with(Style::rounded());
            self.line(table);
        }
        self.flush();
    }

    fn show_summary(&mut self, item: &CatalogItem) {
        self.line(format!(
            "{} {} {}",
            item.display_id().cyan(),
            item.name.bold(),
            format_type_badges(item)
        ));
        for stat in &item.stats {
            self.line(format!("  {:<16} {:>3}", stat.stat.name, stat.base_stat));
        }
        self.flush();
    }

    fn show_tooltip(&mut self, anchor: TooltipAnchor, text: &str) {
        let label = match anchor {
            TooltipAnchor::Column(column) => column.to_string(),
            TooltipAnchor::Cell { row, column } => format!("{column} #{}", row + 1),
            TooltipAnchor::Move(row) => format!("move #{}", row + 1),
            TooltipAnchor::Ability(index) => format!("ability #{}", index + 1),
        };
        self.line(format!("  {} {}", format!("[{label}]").yellow(), text));
        self.flush();
    }

    fn hide_tooltip(&mut self) {}

    fn set_filter_active(&mut self, control: &FilterControl, active: bool) {
        let label = match control {
            FilterControl::Type(name) => format!("type {name}"),
            FilterControl::Generation(generation) => generation.label(),
        };
        self.line(format_toggle(&label, active));
    }

    fn notice(&mut self, message: &str) {
        self.line(message);
        self.flush();
    }
}
