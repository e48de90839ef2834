use crate::catalog::{CatalogItem, Generation};
use crate::detail::{DetailRecord, MoveColumn};

/// A filter control whose active state the presentation shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterControl {
    Type(String),
    Generation(Generation),
}

/// What a tooltip is attached to in the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAnchor {
    /// Header of a move table column
    Column(MoveColumn),
    /// One cell of the move table (zero-based row)
    Cell { row: usize, column: MoveColumn },
    /// Name cell of a move row
    Move(usize),
    Ability(usize),
}

/// Output side of the browser.
///
/// Every operation may be called repeatedly with the same arguments.
pub trait Presenter {
    /// Remove every rendered list entry
    fn clear_list(&mut self);

    /// Render `items` after the entries already shown
    fn append_list(&mut self, items: &[&CatalogItem]);

    fn set_load_more(&mut self, visible: bool);

    fn show_list_view(&mut self);

    fn show_detail(&mut self, record: &DetailRecord);

    /// Hover card for a list entry
    fn show_summary(&mut self, item: &CatalogItem);

    fn show_tooltip(&mut self, anchor: TooltipAnchor, text: &str);

    fn hide_tooltip(&mut self);

    fn set_filter_active(&mut self, control: &FilterControl, active: bool);

    /// Informational line outside the list and detail views
    fn notice(&mut self, message: &str);
}
