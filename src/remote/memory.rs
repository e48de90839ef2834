//! In-memory catalog backend.
//!
//! Serves a fixed set of records through [`CatalogSource`], addressed by
//! `memory://` urls. Every request is recorded, and individual urls can be
//! made to fail, so callers can observe fetch patterns without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::CatalogSource;
use crate::catalog::{AbilityInfo, CatalogItem, Listing, MoveInfo, NamedResource};
use crate::error::{DexError, Result};

#[derive(Debug, Default)]
pub struct MemorySource {
    items: Vec<CatalogItem>,
    abilities: HashMap<String, AbilityInfo>,
    moves: HashMap<String, MoveInfo>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// Request key recorded for `fetch_count`
    pub const COUNT_REQUEST: &'static str = "count";

    /// Url prefix of every record this source serves
    pub const BASE: &'static str = "memory://";

    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn item_url(id: u32) -> String {
        format!("{}pokemon/{id}/", Self::BASE)
    }

    pub fn ability_url(name: &str) -> String {
        format!("{}ability/{name}/", Self::BASE)
    }

    pub fn move_url(name: &str) -> String {
        format!("{}move/{name}/", Self::BASE)
    }

    /// Request key recorded for `fetch_listing`
    pub fn listing_request(offset: usize, limit: usize) -> String {
        format!("listing?offset={offset}&limit={limit}")
    }

    /// Request key recorded for `fetch_item_by_name`
    pub fn by_name_request(name_or_id: &str) -> String {
        format!("by-name/{name_or_id}")
    }

    pub fn with_ability(mut self, info: AbilityInfo) -> Self {
        self.abilities.insert(Self::ability_url(&info.name), info);
        self
    }

    pub fn with_move(mut self, info: MoveInfo) -> Self {
        self.moves.insert(Self::move_url(&info.name), info);
        self
    }

    /// Make every request recorded under `request` fail
    pub fn failing(mut self, request: &str) -> Self {
        self.failing.insert(request.to_string());
        self
    }

    /// Every request made so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// How many times `request` was made
    pub fn request_count(&self, request: &str) -> usize {
        self.requests().iter().filter(|r| *r == request).count()
    }

    fn record(&self, request: &str) -> Result<()> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.to_string());
        }
        if self.failing.contains(request) {
            return Err(DexError::Other(format!("connection reset: {request}")));
        }
        Ok(())
    }
}

impl CatalogSource for MemorySource {
    async fn fetch_count(&self) -> Result<usize> {
        self.record(Self::COUNT_REQUEST)?;
        Ok(self.items.len())
    }

    async fn fetch_listing(&self, offset: usize, limit: usize) -> Result<Listing> {
        self.record(&Self::listing_request(offset, limit))?;
        let results = self
            .items
            .iter()
            .skip(offset)
            .take(limit)
            .map(|item| NamedResource::new(item.name.clone(), Self::item_url(item.id)))
            .collect();
        Ok(Listing {
            count: self.items.len(),
            results,
        })
    }

    async fn fetch_item(&self, url: &str) -> Result<CatalogItem> {
        self.record(url)?;
        self.items
            .iter()
            .find(|item| Self::item_url(item.id) == url)
            .cloned()
            .ok_or_else(|| DexError::ItemNotFound(url.to_string()))
    }

    async fn fetch_item_by_name(&self, name_or_id: &str) -> Result<CatalogItem> {
        self.record(&Self::by_name_request(name_or_id))?;
        let key = name_or_id.trim().to_lowercase();
        self.items
            .iter()
            .find(|item| !key.is_empty() && (item.name == key || item.id.to_string() == key))
            .cloned()
            .ok_or_else(|| DexError::ItemNotFound(name_or_id.to_string()))
    }

    async fn fetch_ability(&self, url: &str) -> Result<AbilityInfo> {
        self.record(url)?;
        self.abilities.get(url).cloned().ok_or_else(|| DexError::Api {
            status: 404,
            url: url.to_string(),
        })
    }

    async fn fetch_move(&self, url: &str) -> Result<MoveInfo> {
        self.record(url)?;
        self.moves.get(url).cloned().ok_or_else(|| DexError::Api {
            status: 404,
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::item;

    #[tokio::test]
    async fn test_listing_pages_through_items() {
        let source = MemorySource::new(vec![
            item(1, "bulbasaur", &["grass"]),
            item(4, "charmander", &["fire"]),
            item(7, "squirtle", &["water"]),
        ]);
        let listing = source.fetch_listing(1, 5).await.unwrap();
        assert_eq!(listing.count, 3);
        assert_eq!(listing.results.len(), 2);
        assert_eq!(listing.results[0].url, MemorySource::item_url(4));

        let fetched = source.fetch_item(&listing.results[1].url).await.unwrap();
        assert_eq!(fetched.name, "squirtle");
        assert_eq!(
            source.requests(),
            vec![
                MemorySource::listing_request(1, 5),
                MemorySource::item_url(7)
            ]
        );
    }

    #[tokio::test]
    async fn test_by_name_rejects_blank_key() {
        let source = MemorySource::new(vec![item(25, "pikachu", &["electric"])]);
        assert_eq!(source.fetch_item_by_name("Pikachu").await.unwrap().id, 25);
        assert_eq!(source.fetch_item_by_name("25").await.unwrap().id, 25);
        assert!(matches!(
            source.fetch_item_by_name("  ").await,
            Err(DexError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failing_request() {
        let source = MemorySource::new(Vec::new()).failing(MemorySource::COUNT_REQUEST);
        assert!(source.fetch_count().await.is_err());
        assert_eq!(source.request_count(MemorySource::COUNT_REQUEST), 1);
    }
}
