//! PokéAPI provider implementation over plain REST.
//!
//! The listing endpoint is `GET {base}/pokemon?offset=&limit=`; every other
//! resource is addressed by the absolute urls embedded in earlier responses.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::catalog::{AbilityInfo, CatalogItem, Listing, MoveInfo};
use crate::config::Config;
use crate::error::{DexError, Result};

use super::CatalogSource;

const LISTING_RESOURCE: &str = "pokemon";

/// HTTP client for the PokéAPI
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base: Url,
}

impl PokeApiClient {
    /// Create a client from the configured base URL and timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pokejournal/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base: config.api_base()?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DexError::Config(format!("api_url '{}' cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn listing_url(&self, offset: usize, limit: usize) -> Result<Url> {
        let mut url = self.endpoint(&[LISTING_RESOURCE])?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch an item record, rejecting bodies without a real id or name
    async fn get_item(&self, url: Url) -> Result<CatalogItem> {
        let item: CatalogItem = self.get_json(url.clone()).await?;
        if item.id == 0 || item.name.is_empty() {
            return Err(DexError::InvalidRecord(url.to_string()));
        }
        Ok(item)
    }
}

impl CatalogSource for PokeApiClient {
    async fn fetch_count(&self) -> Result<usize> {
        let listing: Listing = self.get_json(self.listing_url(0, 1)?).await?;
        Ok(listing.count)
    }

    async fn fetch_listing(&self, offset: usize, limit: usize) -> Result<Listing> {
        self.get_json(self.listing_url(offset, limit)?).await
    }

    async fn fetch_item(&self, url: &str) -> Result<CatalogItem> {
        self.get_item(Url::parse(url)?).await
    }

    async fn fetch_item_by_name(&self, name_or_id: &str) -> Result<CatalogItem> {
        let key = name_or_id.trim().to_lowercase();
        // An empty segment would address the listing endpoint itself
        if key.is_empty() {
            return Err(DexError::ItemNotFound(name_or_id.to_string()));
        }
        let url = self.endpoint(&[LISTING_RESOURCE, &key])?;
        match self.get_item(url).await {
            Err(DexError::Api { status: 404, .. }) => {
                Err(DexError::ItemNotFound(name_or_id.to_string()))
            }
            other => other,
        }
    }

    async fn fetch_ability(&self, url: &str) -> Result<AbilityInfo> {
        self.get_json(Url::parse(url)?).await
    }

    async fn fetch_move(&self, url: &str) -> Result<MoveInfo> {
        self.get_json(Url::parse(url)?).await
    }
}
