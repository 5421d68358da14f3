//! OHLCV sub-client.

use crate::client::DexClient;
use crate::domain::bar::Bar;
use crate::error::ChartError;
use crate::shared::Resolution;

/// Sub-client for OHLCV series.
pub struct Ohlcv<'a> {
    pub(crate) client: &'a DexClient,
}

impl<'a> Ohlcv<'a> {
    /// Bars for the token at `address`, oldest first.
    pub async fn get(
        &self,
        address: &str,
        resolution: Option<Resolution>,
    ) -> Result<Vec<Bar>, ChartError> {
        let bars = self.client.http.get_ohlcv(address, resolution).await?;
        let inconsistent = bars.iter().filter(|bar| !bar.is_consistent()).count();
        if inconsistent > 0 {
            tracing::warn!(address, inconsistent, "OHLCV series has bars outside their range");
        }
        Ok(bars)
    }
}
