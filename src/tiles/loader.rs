use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;

use super::source::{TileSource, UrlTemplateSource};
use crate::core::geo::TileCoord;
use crate::{MapError, Result};

/// Client shared by every [`HttpTileFetcher`] built without an explicit one.
///
/// Public tile servers such as OpenStreetMap refuse requests without an
/// identifying User-Agent.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("staticmap/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("failed to build reqwest async client")
});

/// Anything that can turn a tile coordinate into encoded image bytes.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    /// Fetch one tile. Any error makes the compositor skip the tile.
    async fn fetch(&self, coord: TileCoord) -> Result<Vec<u8>>;
}

/// Fetches tiles over HTTP GET from a [`TileSource`].
pub struct HttpTileFetcher {
    source: Box<dyn TileSource>,
    client: reqwest::Client,
}

impl HttpTileFetcher {
    pub fn new(source: impl TileSource + 'static) -> Self {
        Self::with_client(source, HTTP_CLIENT.clone())
    }

    /// Fetcher for a base URL or `{z}/{x}/{y}` template.
    pub fn from_server(server: &str) -> Self {
        Self::new(UrlTemplateSource::from_server(server))
    }

    pub fn with_client(source: impl TileSource + 'static, client: reqwest::Client) -> Self {
        Self {
            source: Box::new(source),
            client,
        }
    }
}

#[async_trait]
impl TileFetcher for HttpTileFetcher {
    async fn fetch(&self, coord: TileCoord) -> Result<Vec<u8>> {
        let url = self.source.url(coord);
        log::trace!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MapError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let data = response.bytes().await?.to_vec();
        Ok(data)
    }
}

/// Configuration for the tile loader
#[derive(Debug, Clone, PartialEq)]
pub struct TileLoaderConfig {
    /// Maximum concurrent tile downloads
    pub max_concurrent: usize,
    /// Maximum number of retry attempts per tile
    pub max_retries: usize,
    /// Delay between retry attempts
    pub retry_delay: Duration,
    /// Upper bound for a single fetch; `None` waits forever.
    pub request_timeout: Option<Duration>,
}

impl Default for TileLoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            max_retries: 0,
            retry_delay: Duration::from_millis(100),
            request_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl TileLoaderConfig {
    /// One request at a time, in window order.
    pub fn sequential() -> Self {
        Self {
            max_concurrent: 1,
            ..Self::default()
        }
    }

    pub fn for_testing() -> Self {
        Self {
            max_concurrent: 4,
            max_retries: 0,
            retry_delay: Duration::from_millis(1),
            request_timeout: Some(Duration::from_secs(2)),
        }
    }
}

/// Result of a tile loading operation
#[derive(Debug)]
pub struct TileResult {
    pub coord: TileCoord,
    pub data: Result<Vec<u8>>,
}

/// Fetches a batch of tiles with bounded concurrency.
#[derive(Clone)]
pub struct TileLoader {
    fetcher: Arc<dyn TileFetcher>,
    config: TileLoaderConfig,
}

impl TileLoader {
    pub fn new(fetcher: Arc<dyn TileFetcher>, config: TileLoaderConfig) -> Self {
        Self { fetcher, config }
    }

    /// Get configuration
    pub fn config(&self) -> &TileLoaderConfig {
        &self.config
    }

    /// Loads every coordinate and returns the results in request order,
    /// whatever order the downloads finish in.
    pub async fn load_all(&self, coords: Vec<TileCoord>) -> Vec<TileResult> {
        let limit = self.config.max_concurrent.max(1);
        log::debug!("loading {} tiles (max_concurrent: {})", coords.len(), limit);

        stream::iter(coords)
            .map(|coord| self.load_one(coord))
            .buffered(limit)
            .collect()
            .await
    }

    async fn load_one(&self, coord: TileCoord) -> TileResult {
        if !coord.is_valid() {
            log::debug!("tile {} lies outside the zoom {} grid", coord, coord.z);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            log::debug!("fetch tile {} attempt {}", coord, attempt);

            match self.fetch_with_timeout(coord).await {
                Ok(data) => {
                    log::debug!("downloaded tile {} ({} bytes)", coord, data.len());
                    return TileResult {
                        coord,
                        data: Ok(data),
                    };
                }
                Err(e) if attempt <= self.config.max_retries => {
                    log::warn!("tile {} download failed on attempt {}: {}", coord, attempt, e);
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    return TileResult {
                        coord,
                        data: Err(e),
                    };
                }
            }
        }
    }

    async fn fetch_with_timeout(&self, coord: TileCoord) -> Result<Vec<u8>> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch(coord))
                .await
                .map_err(|_| MapError::Timeout { coord, after: limit })?,
            None => self.fetcher.fetch(coord).await,
        }
    }
}
