//! Low-level HTTP client: `DexHttp`.
//!
//! One method per API endpoint. Returns wire types; conversion to domain types
//! happens in the sub-clients of [`DexClient`](crate::client::DexClient).

use crate::domain::bar::wire::OhlcvResponse;
use crate::domain::bar::Bar;
use crate::domain::token::wire::TokenSearchResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::Resolution;

use reqwest::header::RETRY_AFTER;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the token REST API.
#[derive(Debug, Clone)]
pub struct DexHttp {
    base_url: String,
    client: Client,
}

impl DexHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(10);
        }
        Ok(Self::with_client(base_url, builder.build()?))
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Tokens ───────────────────────────────────────────────────────────

    /// Search tokens/pools by name fragment or contract address.
    pub async fn search_tokens(&self, query: &str) -> Result<TokenSearchResponse, HttpError> {
        let url = format!(
            "{}/api/tokens/search?currencyAddress={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get(&url, RetryPolicy::Search).await
    }

    // ── OHLCV ────────────────────────────────────────────────────────────

    pub async fn get_ohlcv(
        &self,
        address: &str,
        resolution: Option<Resolution>,
    ) -> Result<Vec<Bar>, HttpError> {
        let mut url = format!(
            "{}/api/tokens/{}/ohlcv",
            self.base_url,
            urlencoding::encode(address)
        );
        if let Some(r) = resolution {
            url = format!("{}?resolution={}", url, r.as_str());
        }
        let resp: OhlcvResponse = self.get(&url, RetryPolicy::Idempotent).await?;
        Ok(resp.into_bars())
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, retry: RetryPolicy) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if config.should_retry(&e) && attempt < config.max_retries {
                        let delay = config.delay_after(&e, attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1000));
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let http = DexHttp::with_client("https://api.example.com/", Client::new());
        assert_eq!(http.base_url(), "https://api.example.com");
    }
}
