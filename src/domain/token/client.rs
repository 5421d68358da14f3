//! Tokens sub-client: search and cached lookup by address.

use crate::client::DexClient;
use crate::domain::token::TokenSummary;
use crate::error::{ChartError, HttpError};
use std::time::Instant;

/// Sub-client for token operations.
pub struct Tokens<'a> {
    pub(crate) client: &'a DexClient,
}

impl<'a> Tokens<'a> {
    /// Search by name fragment or address. Hits are cached by address.
    pub async fn search(&self, query: &str) -> Result<Vec<TokenSummary>, ChartError> {
        let resp = self.client.http.search_tokens(query).await?;
        let tokens: Vec<TokenSummary> = resp.into();
        self.cache_tokens(&tokens).await;
        Ok(tokens)
    }

    /// Token at `address`. Uses TTL cache.
    pub async fn get(&self, address: &str) -> Result<TokenSummary, ChartError> {
        {
            let cache = self.client.token_cache.read().await;
            if let Some((token, fetched_at)) = cache.get(address) {
                if fetched_at.elapsed() < self.client.token_cache_ttl {
                    return Ok(token.clone());
                }
            }
        }

        let tokens = self.search(address).await?;
        tokens
            .into_iter()
            .find(|t| t.address.eq_ignore_ascii_case(address))
            .ok_or_else(|| {
                ChartError::Http(HttpError::NotFound(format!("Token not found: {}", address)))
            })
    }

    /// First search hit for `address`, as the token page header shows it.
    pub async fn first(&self, address: &str) -> Result<Option<TokenSummary>, ChartError> {
        Ok(self.search(address).await?.into_iter().next())
    }

    /// Invalidate a cached token by address.
    pub async fn invalidate(&self, address: &str) {
        self.client.token_cache.write().await.remove(address);
    }

    pub async fn clear_cache(&self) {
        self.client.token_cache.write().await.clear();
    }

    async fn cache_tokens(&self, tokens: &[TokenSummary]) {
        let now = Instant::now();
        let mut cache = self.client.token_cache.write().await;
        for token in tokens.iter().filter(|t| !t.address.is_empty()) {
            cache.insert(token.address.clone(), (token.clone(), now));
        }
    }
}
