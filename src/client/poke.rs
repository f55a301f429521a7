//! PokeAPI client
//!
//! Fetch-or-cache access to the catalog, plus typed helpers for the
//! endpoints the REPL uses.

use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::cache::Cache;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, Pokemon};

/// Catalog client backed by a shared response cache.
#[derive(Debug, Clone)]
pub struct PokeClient {
    http: Client,
    cache: Cache,
    base_url: String,
}

impl PokeClient {
    /// Creates a client rooted at `base_url` that caches through `cache`.
    pub fn new(base_url: impl Into<String>, cache: Cache) -> Self {
        Self::with_client(Client::new(), base_url, cache)
    }

    /// Creates a client with a custom HTTP client.
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: Cache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            cache,
            base_url,
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Fetch ==
    /// Returns the raw body for `url`, from the cache when present.
    ///
    /// On a miss the full body is downloaded and stored under `url` before
    /// being returned. Non-success responses are reported and not cached.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching");
        let response = self.http.get(url).send().await.map_err(|err| {
            error!(url, error = %err, "Error while getting");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(url, %status, "Unexpected response status");
            return Err(PokedexError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|err| {
            error!(url, error = %err, "Error while reading body");
            err
        })?;

        self.cache.put(url, body.clone());
        Ok(body)
    }

    /// Fetches `url` and decodes its body as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch(url).await?;
        serde_json::from_slice(&body).map_err(|err| {
            error!(url, error = %err, "Error while decoding body");
            PokedexError::from(err)
        })
    }

    // == Typed Endpoints ==
    /// Returns the URL of the first `location-area` page.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// Fetches a page of location areas, starting from the first page when
    /// `url` is `None`.
    pub async fn location_areas(&self, url: Option<&str>) -> Result<LocationAreaPage> {
        match url {
            Some(url) => self.fetch_json(url).await,
            None => self.fetch_json(&self.first_location_page_url()).await,
        }
    }

    /// Fetches a single location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaDetail> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    /// Fetches a pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}/", self.base_url, name);
        self.fetch_json(&url).await
    }
}
