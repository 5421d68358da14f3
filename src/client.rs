//! High-level client: `DexClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and the provider trait
//! implementations the chart controller and compare dialog consume.

use crate::domain::bar::client::Ohlcv;
use crate::domain::compare::{CompareData, CompareDataProvider};
use crate::domain::token::client::Tokens;
use crate::domain::token::{TokenSearch, TokenSummary};
use crate::error::ChartError;
use crate::http::DexHttp;
use crate::shared::{Resolution, SymbolName};
use crate::widget::MainSeries;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::bar::client::Ohlcv as OhlcvClient;
pub use crate::domain::token::client::Tokens as TokensClient;

/// Name shown when a token record carries none.
pub const UNKNOWN_TOKEN: &str = "Unknown Token";

/// Entry point for the token REST API.
///
/// Provides nested sub-client accessors: `client.tokens()`, `client.ohlcv()`.
#[derive(Clone)]
pub struct DexClient {
    pub(crate) http: DexHttp,
    /// Token cache: address → (TokenSummary, fetched_at)
    pub(crate) token_cache: Arc<RwLock<HashMap<String, (TokenSummary, Instant)>>>,
    pub(crate) token_cache_ttl: Duration,
    /// Resolution requested for comparison series; server default when unset.
    pub(crate) compare_resolution: Option<Resolution>,
}

impl DexClient {
    pub fn builder() -> DexClientBuilder {
        DexClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn ohlcv(&self) -> Ohlcv<'_> {
        Ohlcv { client: self }
    }

    /// Load the main series for the token page at `/tokens/{network}/{address}`.
    pub async fn main_series(
        &self,
        network: &str,
        address: &str,
        resolution: Option<Resolution>,
    ) -> Result<MainSeries, ChartError> {
        let token = self.tokens().first(address).await?;
        let bars = self.ohlcv().get(address, resolution).await?;

        let (symbol, description, exchange) = match &token {
            Some(t) => (
                symbol_for(t, address),
                t.name.clone(),
                t.dex.clone().unwrap_or_default(),
            ),
            None => (address.to_string(), UNKNOWN_TOKEN.to_string(), String::new()),
        };

        Ok(MainSeries::new(
            format!("/tokens/{}/{}", network, address),
            symbol,
            description,
            exchange,
            bars,
        ))
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.token_cache.write().await.clear();
    }
}

/// Chart symbol for a token: its base ticker, else the address.
fn symbol_for(token: &TokenSummary, address: &str) -> String {
    match token.short_name() {
        "" => address.to_string(),
        name => name.to_string(),
    }
}

impl TokenSearch for DexClient {
    async fn search_tokens(&self, query: &str) -> Result<Vec<TokenSummary>, ChartError> {
        self.tokens().search(query).await
    }
}

impl CompareDataProvider for DexClient {
    async fn fetch_compare(&self, address: &str) -> Result<CompareData, ChartError> {
        let token = self.tokens().get(address).await?;
        let bars = self.ohlcv().get(address, self.compare_resolution).await?;
        Ok(CompareData {
            bars,
            symbol_name: SymbolName::new(symbol_for(&token, address)),
            description: token.name,
        })
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DexClientBuilder {
    base_url: String,
    token_cache_ttl: Duration,
    compare_resolution: Option<Resolution>,
    http_client: Option<reqwest::Client>,
}

impl Default for DexClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            token_cache_ttl: Duration::from_secs(60),
            compare_resolution: None,
            http_client: None,
        }
    }
}

impl DexClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn token_cache_ttl(mut self, ttl: Duration) -> Self {
        self.token_cache_ttl = ttl;
        self
    }

    pub fn compare_resolution(mut self, resolution: Resolution) -> Self {
        self.compare_resolution = Some(resolution);
        self
    }

    /// Use a preconfigured reqwest client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> Result<DexClient, ChartError> {
        let http = match self.http_client {
            Some(client) => DexHttp::with_client(&self.base_url, client),
            None => DexHttp::new(&self.base_url)?,
        };
        Ok(DexClient {
            http,
            token_cache: Arc::new(RwLock::new(HashMap::new())),
            token_cache_ttl: self.token_cache_ttl,
            compare_resolution: self.compare_resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str) -> TokenSummary {
        TokenSummary {
            id: "solana_EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm".into(),
            address: "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm".into(),
            name: name.into(),
            network: Some("solana".into()),
            dex: Some("raydium".into()),
            price_usd: None,
            price_change_24h: None,
            image_url: None,
        }
    }

    #[test]
    fn test_symbol_for_uses_base_ticker() {
        assert_eq!(symbol_for(&token("WIF / SOL"), "EKpQ"), "WIF");
        assert_eq!(symbol_for(&token(" / SOL"), "EKpQ"), "EKpQ");
    }

    #[test]
    fn test_builder_defaults() {
        let client = DexClient::builder()
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();
        assert_eq!(client.http.base_url(), crate::network::DEFAULT_API_URL);
        assert_eq!(client.token_cache_ttl, Duration::from_secs(60));
        assert_eq!(client.compare_resolution, None);
    }

    #[tokio::test]
    async fn test_cached_token_is_served_without_request() {
        let client = DexClient::builder()
            .base_url("http://127.0.0.1:9")
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();
        let cached = token("WIF / SOL");
        client
            .token_cache
            .write()
            .await
            .insert(cached.address.clone(), (cached.clone(), Instant::now()));

        let hit = client.tokens().get(&cached.address).await.unwrap();
        assert_eq!(hit, cached);

        client.tokens().invalidate(&cached.address).await;
        assert!(client.token_cache.read().await.is_empty());
    }
}
