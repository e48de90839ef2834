pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod display;
pub mod error;
pub mod filter;
pub mod nav;
pub mod remote;
pub mod render;

pub use app::{App, BrowseCommand};
pub use catalog::{CatalogItem, CatalogStore, ELEMENT_TYPES, Generation};
pub use config::Config;
pub use detail::{DetailCache, DetailRecord, assemble};
pub use error::{DexError, Result};
pub use filter::{FilterState, SearchQuery, apply};
pub use nav::{History, Location, View, resolve};
pub use remote::{CatalogSource, LoadEvent, MemorySource, PokeApiClient, load_catalog};
pub use render::{Presenter, Reveal, TerminalPresenter, advance};
