use unicase::UniCase;

use super::CatalogItem;

/// In-memory catalog for one session.
///
/// Items are only ever appended, in the order pages arrive. The `displayed`
/// cursor counts how many items of the current filtered view have been handed
/// to the presenter; callers reset it whenever the filter changes.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: Vec<CatalogItem>,
    displayed: usize,
    loading: bool,
    finished: bool,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = CatalogItem>) {
        self.items.extend(items);
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    /// Move the cursor, never past `filtered_len`
    pub fn set_displayed(&mut self, displayed: usize, filtered_len: usize) {
        self.displayed = displayed.min(filtered_len);
    }

    pub fn reset_displayed(&mut self) {
        self.displayed = 0;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a full load pass completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mark a load pass as started. Returns false if one is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.finished = false;
        true
    }

    /// Mark the running load pass as over, successful or not
    pub fn finish_load(&mut self, completed: bool) {
        self.loading = false;
        self.finished = completed;
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        let wanted = UniCase::new(name);
        self.items
            .iter()
            .find(|item| UniCase::new(item.name.as_str()) == wanted)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
