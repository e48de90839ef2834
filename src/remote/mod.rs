//! Remote catalog access.
//!
//! This module defines the [`CatalogSource`] seam over the PokéAPI and the
//! bulk loader that fills the catalog page by page.

#[cfg(test)]
pub(crate) mod fake;
pub mod memory;
pub mod pokeapi;

use std::future::Future;

use futures::future::try_join_all;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::catalog::{AbilityInfo, CatalogItem, Listing, MoveInfo};
use crate::error::{DexError, Result};

pub use memory::MemorySource;
pub use pokeapi::PokeApiClient;

/// Buffered load events between the loader task and the controller
pub const LOAD_CHANNEL_CAPACITY: usize = 16;

/// Common interface for catalog backends
pub trait CatalogSource: Send + Sync {
    /// Total number of entries the listing endpoint reports
    fn fetch_count(&self) -> impl Future<Output = Result<usize>> + Send;

    /// One page of listing entries
    fn fetch_listing(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Listing>> + Send;

    /// Full record behind a listing entry's url
    fn fetch_item(&self, url: &str) -> impl Future<Output = Result<CatalogItem>> + Send;

    /// Full record looked up directly by name or numeric id
    fn fetch_item_by_name(
        &self,
        name_or_id: &str,
    ) -> impl Future<Output = Result<CatalogItem>> + Send;

    fn fetch_ability(&self, url: &str) -> impl Future<Output = Result<AbilityInfo>> + Send;

    fn fetch_move(&self, url: &str) -> impl Future<Output = Result<MoveInfo>> + Send;
}

/// Progress of a bulk catalog load
#[derive(Debug)]
pub enum LoadEvent {
    /// A fully resolved page; `first` is set for the page at offset zero
    Page { items: Vec<CatalogItem>, first: bool },
    /// Every page arrived
    Finished { total: usize },
    /// The pass stopped early; `loaded` items were delivered before the error
    Failed { error: DexError, loaded: usize },
}

impl LoadEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadEvent::Page { .. })
    }
}

/// Load the whole catalog, sending each page to `events` as it completes.
///
/// Pages are requested one after another; the item records of a page are
/// fetched concurrently and joined before the page is sent. The first error
/// ends the pass. Exactly one terminal event (`Finished` or `Failed`) is sent
/// last, unless the receiver is gone.
pub async fn load_catalog<S: CatalogSource>(
    source: &S,
    batch_size: usize,
    events: mpsc::Sender<LoadEvent>,
) {
    let mut loaded = 0;
    let terminal = match load_pages(source, batch_size.max(1), &events, &mut loaded).await {
        Ok(()) => {
            info!(total = loaded, "catalog load complete");
            LoadEvent::Finished { total: loaded }
        }
        Err(error) => {
            error!(%error, loaded, "catalog load aborted");
            LoadEvent::Failed { error, loaded }
        }
    };

    if events.send(terminal).await.is_err() {
        debug!("catalog receiver dropped before load finished");
    }
}

async fn load_pages<S: CatalogSource>(
    source: &S,
    batch_size: usize,
    events: &mpsc::Sender<LoadEvent>,
    loaded: &mut usize,
) -> Result<()> {
    let total = source.fetch_count().await?;
    debug!(total, batch_size, "catalog count received");

    for offset in (0..total).step_by(batch_size) {
        debug!(offset, limit = batch_size, "fetching catalog page");
        let listing = source.fetch_listing(offset, batch_size).await?;
        let items = try_join_all(
            listing
                .results
                .iter()
                .map(|entry| source.fetch_item(&entry.url)),
        )
        .await?;

        let count = items.len();
        let first = offset == 0;
        *loaded += count;
        debug!(offset, count, "catalog page resolved");

        if events.send(LoadEvent::Page { items, first }).await.is_err() {
            debug!(offset, "catalog receiver dropped, stopping load");
            return Ok(());
        }
        if first {
            info!(count, "first catalog page ready");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::fake::item;
    use super::*;

    async fn run_load(source: &MemorySource, batch_size: usize) -> Vec<LoadEvent> {
        let (tx, mut rx) = mpsc::channel(LOAD_CHANNEL_CAPACITY);
        let collect = async {
            let mut events = Vec::new();
            while let Some(event) = rx.recv().await {
                events.push(event);
            }
            events
        };
        let ((), events) = tokio::join!(load_catalog(source, batch_size, tx), collect);
        events
    }

    fn catalog(count: u32) -> Vec<CatalogItem> {
        (1..=count)
            .map(|id| item(id, &format!("mon-{id}"), &["normal"]))
            .collect()
    }

    #[tokio::test]
    async fn test_load_sends_pages_in_order_then_finished() {
        let source = MemorySource::new(catalog(7));
        let events = run_load(&source, 3).await;

        assert_eq!(events.len(), 4);
        let mut ids = Vec::new();
        for (index, event) in events[..3].iter().enumerate() {
            match event {
                LoadEvent::Page { items, first } => {
                    assert_eq!(*first, index == 0);
                    ids.extend(items.iter().map(|i| i.id));
                }
                other => panic!("expected page, got {other:?}"),
            }
        }
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        assert!(matches!(events[3], LoadEvent::Finished { total: 7 }));
    }

    #[tokio::test]
    async fn test_load_requests_pages_sequentially() {
        let source = MemorySource::new(catalog(5));
        run_load(&source, 2).await;

        let listings: Vec<String> = source
            .requests()
            .into_iter()
            .filter(|r| r.starts_with("listing"))
            .collect();
        assert_eq!(
            listings,
            vec!["listing?offset=0&limit=2", "listing?offset=2&limit=2", "listing?offset=4&limit=2"]
        );
    }

    #[tokio::test]
    async fn test_load_aborts_on_item_failure_keeping_earlier_pages() {
        let source = MemorySource::new(catalog(6)).failing(&MemorySource::item_url(4));
        let events = run_load(&source, 3).await;

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], LoadEvent::Page { items, first: true } if items.len() == 3));
        match &events[1] {
            LoadEvent::Failed { loaded, .. } => assert_eq!(*loaded, 3),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(events[1].is_terminal());
    }

    #[tokio::test]
    async fn test_load_count_failure_is_terminal() {
        let source = MemorySource::new(catalog(2)).failing(MemorySource::COUNT_REQUEST);
        let events = run_load(&source, 10).await;

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], LoadEvent::Failed { loaded: 0, .. }));
    }

    #[tokio::test]
    async fn test_load_empty_catalog_finishes() {
        let source = MemorySource::new(Vec::new());
        let events = run_load(&source, 10).await;

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], LoadEvent::Finished { total: 0 }));
    }
}
