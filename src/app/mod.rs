//! Application controller for the interactive browser.
//!
//! [`App`] owns all session state (catalog, filters, history and the open
//! detail view) and is the only place it is mutated. Load progress and user
//! commands are fed in one at a time by the session loop.

pub mod command;

use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, warn};
use unicase::UniCase;

use crate::catalog::{CatalogItem, CatalogStore, Generation};
use crate::config::Config;
use crate::detail::{DetailCache, DetailRecord, MoveColumn, assemble};
use crate::error::{DexError, Result};
use crate::filter::{FilterState, ID_MARKER, apply};
use crate::nav::{History, Location, View, resolve};
use crate::remote::{CatalogSource, LoadEvent};
use crate::render::{FilterControl, Presenter, TooltipAnchor, advance};

pub use command::{BrowseCommand, HELP_TEXT};

enum Screen {
    List,
    Detail {
        record: DetailRecord,
        cache: DetailCache,
    },
}

pub struct App<S, P> {
    source: Arc<S>,
    presenter: P,
    store: CatalogStore,
    filter: FilterState,
    history: History,
    screen: Screen,
    tooltip_visible: bool,
    display_limit: usize,
    moves_limit: usize,
}

/// Find a loaded item by `#id`, bare id or case-insensitive name
fn lookup<'a>(store: &'a CatalogStore, key: &str) -> Result<&'a CatalogItem> {
    let key = key.trim();
    key.strip_prefix(ID_MARKER)
        .unwrap_or(key)
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| store.find_by_id(id))
        .or_else(|| store.find_by_name(key))
        .ok_or_else(|| DexError::ItemNotFound(key.to_string()))
}

/// Pick the tooltip for `target` within an open detail record
fn explain_target(record: &DetailRecord, target: &str) -> Result<(TooltipAnchor, String)> {
    let target = target.trim();

    if let Ok(column) = target.parse::<MoveColumn>() {
        return Ok((TooltipAnchor::Column(column), column.header_tip().to_string()));
    }

    if let Some((head, last)) = target.rsplit_once(char::is_whitespace)
        && let Ok(row) = last.parse::<usize>()
        && let Ok(column) = head.parse::<MoveColumn>()
    {
        let index = row
            .checked_sub(1)
            .filter(|&index| index < record.moves.len())
            .ok_or_else(|| {
                DexError::InvalidCommand(format!(
                    "move row {row} does not exist (1-{})",
                    record.moves.len()
                ))
            })?;
        let text = column.describe_cell(&record.moves[index].cell(column));
        return Ok((TooltipAnchor::Cell { row: index, column }, text));
    }

    let wanted = UniCase::new(target);
    if let Some(index) = record
        .moves
        .iter()
        .position(|m| UniCase::new(m.name.as_str()) == wanted)
    {
        let text = record.moves[index].effect().to_string();
        return Ok((TooltipAnchor::Move(index), text));
    }
    if let Some(index) = record
        .abilities
        .iter()
        .position(|a| UniCase::new(a.name.as_str()) == wanted)
    {
        let text = record.abilities[index].effect().to_string();
        return Ok((TooltipAnchor::Ability(index), text));
    }

    Err(DexError::InvalidCommand(format!(
        "nothing named '{target}' to explain"
    )))
}

impl<S: CatalogSource, P: Presenter> App<S, P> {
    pub fn new(source: Arc<S>, presenter: P, config: &Config) -> Self {
        Self {
            source,
            presenter,
            store: CatalogStore::new(),
            filter: FilterState::new(),
            history: History::default(),
            screen: Screen::List,
            tooltip_visible: false,
            display_limit: config.display_limit.max(1),
            moves_limit: config.moves_limit,
        }
    }

    /// Start the session at `location` instead of the list
    pub fn with_location(mut self, location: Location) -> Self {
        self.history.replace(location);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The open detail view, if any
    pub fn detail(&self) -> Option<&DetailRecord> {
        match &self.screen {
            Screen::Detail { record, .. } => Some(record),
            Screen::List => None,
        }
    }

    /// Claim the store for a bulk load. False while another load runs.
    pub fn begin_load(&mut self) -> bool {
        self.store.begin_load()
    }

    pub async fn on_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Page { items, first } => {
                self.store.extend(items);
                if first {
                    self.refresh_list();
                } else {
                    self.update_load_more();
                }
                self.resolve_pending_location().await;
            }
            LoadEvent::Finished { total } => {
                self.store.finish_load(true);
                self.presenter
                    .notice(&format!("Catalog loaded: {total} entries."));
                self.update_load_more();
            }
            LoadEvent::Failed { error, loaded } => {
                self.store.finish_load(false);
                self.presenter.notice(&format!(
                    "Catalog load stopped after {loaded} entries: {error}"
                ));
            }
        }
    }

    /// The loader's channel closed. Clears the loading flag if no terminal
    /// event arrived.
    pub fn on_load_closed(&mut self) {
        if self.store.is_loading() {
            warn!(
                loaded = self.store.len(),
                "catalog loader stopped without a final event"
            );
            self.store.finish_load(false);
        }
    }

    /// Reveal the next page of the filtered view; returns how many entries
    /// were appended
    fn reveal_next(&mut self) -> usize {
        let filtered = apply(self.store.items(), &self.filter);
        let reveal = advance(&filtered, self.store.displayed(), self.display_limit);
        if !reveal.slice.is_empty() {
            self.presenter.append_list(reveal.slice);
        }
        self.presenter.set_load_more(reveal.has_more);

        let (count, displayed, total) = (reveal.slice.len(), reveal.displayed, filtered.len());
        self.store.set_displayed(displayed, total);
        count
    }

    /// Re-render the list from the top after a filter change
    fn refresh_list(&mut self) {
        self.presenter.clear_list();
        self.store.reset_displayed();
        self.reveal_next();
    }

    fn update_load_more(&mut self) {
        let filtered = apply(self.store.items(), &self.filter).len();
        self.presenter
            .set_load_more(self.store.displayed() < filtered);
    }

    /// Filters live on the list; changing one leaves an open detail view
    fn leave_detail(&mut self) {
        if let Screen::Detail { .. } = self.screen {
            self.history.push(Location::List);
            self.screen = Screen::List;
            self.presenter.show_list_view();
        }
    }

    pub fn toggle_type(&mut self, name: &str) -> Result<()> {
        let active = self.filter.toggle_type(name)?;
        let control = FilterControl::Type(name.trim().to_lowercase());
        self.presenter.set_filter_active(&control, active);
        self.leave_detail();
        self.refresh_list();
        Ok(())
    }

    pub fn toggle_generation(&mut self, generation: Generation) {
        let active = self.filter.toggle_generation(generation);
        self.presenter
            .set_filter_active(&FilterControl::Generation(generation), active);
        self.leave_detail();
        self.refresh_list();
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.set_query(query);
        self.leave_detail();
        self.refresh_list();
    }

    pub fn clear_filters(&mut self) {
        for name in self.filter.types().clone() {
            self.presenter
                .set_filter_active(&FilterControl::Type(name), false);
        }
        for generation in self.filter.generations().clone() {
            self.presenter
                .set_filter_active(&FilterControl::Generation(generation), false);
        }
        self.filter.clear();
        self.leave_detail();
        self.refresh_list();
    }

    pub fn load_more(&mut self) {
        if self.store.is_empty() {
            let message = if self.store.is_loading() {
                "The catalog is still loading."
            } else {
                "The catalog is empty."
            };
            self.presenter.notice(message);
            return;
        }
        if self.reveal_next() == 0 {
            self.presenter.notice("Nothing more to show.");
        }
    }

    async fn show_detail(&mut self, item: CatalogItem) {
        let mut cache = match std::mem::replace(&mut self.screen, Screen::List) {
            Screen::Detail { record, cache } if record.item.id == item.id => cache,
            _ => DetailCache::new(),
        };
        let record = assemble(self.source.as_ref(), &item, self.moves_limit, &mut cache).await;
        self.presenter.show_detail(&record);
        self.screen = Screen::Detail { record, cache };
    }

    /// Derive the view from the current location
    async fn show_location(&mut self) {
        let item = match resolve(self.history.current(), &self.store) {
            View::List => None,
            View::Detail(item) => Some(item.clone()),
        };
        match item {
            Some(item) => self.show_detail(item).await,
            None => {
                self.screen = Screen::List;
                self.presenter.show_list_view();
            }
        }
    }

    /// Open the detail view a deep link names once its item has loaded
    async fn resolve_pending_location(&mut self) {
        let Location::Item(name) = self.history.current() else {
            return;
        };
        if let Screen::Detail { record, .. } = &self.screen
            && UniCase::new(record.item.name.as_str()) == UniCase::new(name.as_str())
        {
            return;
        }
        if let View::Detail(item) = resolve(self.history.current(), &self.store) {
            let item = item.clone();
            debug!(name = %item.name, "pending location resolved");
            self.show_detail(item).await;
        }
    }

    pub async fn open(&mut self, key: &str) -> Result<()> {
        let item = lookup(&self.store, key)?.clone();
        self.history.push(Location::item(item.name.clone()));
        self.show_detail(item).await;
        Ok(())
    }

    pub async fn open_location(&mut self, path: &str) {
        self.history.push(Location::parse(path));
        self.show_location().await;
    }

    pub async fn close(&mut self) {
        self.history.push(Location::List);
        self.show_location().await;
    }

    pub async fn back(&mut self) {
        if self.history.back().is_none() {
            self.presenter.notice("Already at the oldest location.");
            return;
        }
        self.show_location().await;
    }

    pub async fn forward(&mut self) {
        if self.history.forward().is_none() {
            self.presenter.notice("Already at the newest location.");
            return;
        }
        self.show_location().await;
    }

    pub fn peek(&mut self, key: &str) -> Result<()> {
        let item = lookup(&self.store, key)?;
        self.presenter.show_summary(item);
        Ok(())
    }

    pub fn explain(&mut self, target: &str) -> Result<()> {
        let Screen::Detail { record, .. } = &self.screen else {
            return Err(DexError::InvalidCommand(
                "open an entry before asking for explanations".to_string(),
            ));
        };
        let (anchor, text) = explain_target(record, target)?;
        self.presenter.show_tooltip(anchor, &text);
        self.tooltip_visible = true;
        Ok(())
    }

    pub fn status(&mut self) {
        let filtered = apply(self.store.items(), &self.filter).len();
        let load = if self.store.is_loading() {
            "loading"
        } else if self.store.is_finished() {
            "complete"
        } else if self.store.is_empty() {
            "not loaded"
        } else {
            "incomplete"
        };

        let types = self.filter.types().iter().cloned().collect::<Vec<_>>();
        let generations = self
            .filter
            .generations()
            .iter()
            .map(|g| g.numeral())
            .collect::<Vec<_>>();
        let none = "none".to_string();

        let text = format!(
            "Catalog: {} entries ({load})\nShown: {} of {filtered} matching\nTypes: {}\nGenerations: {}\nQuery: {}\nLocation: {}",
            self.store.len(),
            self.store.displayed(),
            if types.is_empty() { none.clone() } else { types.join(", ") },
            if generations.is_empty() { none.clone() } else { generations.join(", ") },
            if self.filter.query().is_empty() { none } else { format!("'{}'", self.filter.query()) },
            self.history.current(),
        );
        self.presenter.notice(&text);
    }

    /// Log a failed command and tell the user, without ending the session
    pub fn report_error(&mut self, error: &DexError) {
        warn!(%error, "command failed");
        self.presenter.notice(&format!("error: {error}"));
    }

    pub async fn execute(&mut self, command: BrowseCommand) -> Result<ControlFlow<()>> {
        if self.tooltip_visible {
            self.presenter.hide_tooltip();
            self.tooltip_visible = false;
        }

        match command {
            BrowseCommand::More => self.load_more(),
            BrowseCommand::Type(name) => self.toggle_type(&name)?,
            BrowseCommand::Gen(generation) => self.toggle_generation(generation),
            BrowseCommand::Search(query) => self.set_query(&query),
            BrowseCommand::Clear => self.clear_filters(),
            BrowseCommand::Open(key) => self.open(&key).await?,
            BrowseCommand::Close => self.close().await,
            BrowseCommand::Go(path) => self.open_location(&path).await,
            BrowseCommand::Back => self.back().await,
            BrowseCommand::Forward => self.forward().await,
            BrowseCommand::Peek(key) => self.peek(&key)?,
            BrowseCommand::Explain(target) => self.explain(&target)?,
            BrowseCommand::Status => self.status(),
            BrowseCommand::Help => self.presenter.notice(HELP_TEXT),
            BrowseCommand::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }
}
