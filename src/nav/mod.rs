//! Navigation Controller.
//!
//! A [`Location`] is the shareable form of the current view: `/` for the list
//! and `/item/<name>` for a detail view. [`resolve`] turns a location back into
//! a view against the loaded catalog, and [`History`] keeps the back/forward
//! stack.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tracing::debug;

use crate::catalog::{CatalogItem, CatalogStore};

const ITEM_PREFIX: &str = "/item/";

/// Static hosts redirect unknown paths to `/?/<path>`
const REDIRECT_PREFIX: &str = "/?/";

/// Characters escaped inside a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    List,
    Item(String),
}

impl Location {
    pub fn item(name: impl Into<String>) -> Self {
        Location::Item(name.into())
    }

    pub fn to_path(&self) -> String {
        match self {
            Location::List => "/".to_string(),
            Location::Item(name) => {
                format!("{ITEM_PREFIX}{}", utf8_percent_encode(name, SEGMENT))
            }
        }
    }

    /// Parse a path. Anything that does not name an item is the list.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = match path.strip_prefix(REDIRECT_PREFIX) {
            Some(rest) => format!("/{rest}"),
            None => path.to_string(),
        };

        let Some(segment) = path.strip_prefix(ITEM_PREFIX) else {
            return Location::List;
        };
        let segment = segment.trim_end_matches('/');
        if segment.is_empty() || segment.contains('/') {
            return Location::List;
        }

        let name = percent_decode_str(segment).decode_utf8_lossy();
        if name.trim().is_empty() {
            return Location::List;
        }
        Location::Item(name.into_owned())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// What the browser shows for a location
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    List,
    Detail(&'a CatalogItem),
}

/// Map a location onto the loaded catalog.
///
/// An item name that is not (yet) in the store falls back to the list.
pub fn resolve<'a>(location: &Location, store: &'a CatalogStore) -> View<'a> {
    match location {
        Location::List => View::List,
        Location::Item(name) => match store.find_by_name(name) {
            Some(item) => View::Detail(item),
            None => {
                debug!(
                    name = %name,
                    loaded = store.len(),
                    finished = store.is_finished(),
                    "location does not resolve, showing list"
                );
                View::List
            }
        },
    }
}

/// Browser-style back/forward stack of locations
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Location::List)
    }
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    /// Navigate to `location`, dropping any forward entries.
    ///
    /// Pushing the current location again is a no-op.
    pub fn push(&mut self, location: Location) {
        if *self.current() == location {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index += 1;
    }

    /// Replace the current entry without adding history
    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    pub fn back(&mut self) -> Option<&Location> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}
