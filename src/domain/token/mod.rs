//! Token domain: search results used to pick comparison symbols.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod wire;

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::shared::short_address;

/// A token search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSummary {
    /// Record id, `"{network}_{address}"`.
    pub id: String,
    /// Contract address. Empty when the record carries none.
    pub address: String,
    /// Display name, usually a pair such as `"PEPE / WETH"`.
    pub name: String,
    pub network: Option<String>,
    pub dex: Option<String>,
    pub price_usd: Option<Decimal>,
    pub price_change_24h: Option<Decimal>,
    pub image_url: Option<String>,
}

impl TokenSummary {
    /// Base token of the pair name (`"PEPE / WETH"` → `"PEPE"`).
    pub fn short_name(&self) -> &str {
        self.name.split('/').next().unwrap_or_default().trim()
    }

    /// Address shortened for list rows.
    pub fn short_address(&self) -> String {
        short_address(&self.address)
    }

    pub fn is_price_up(&self) -> bool {
        self.price_change_24h
            .map(|change| change >= Decimal::ZERO)
            .unwrap_or(false)
    }
}

/// Token lookup backing the compare dialog.
pub trait TokenSearch {
    fn search_tokens(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<TokenSummary>, ChartError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn summary(name: &str) -> TokenSummary {
        TokenSummary {
            id: "eth_0x6982508145454ce325ddbe47a25d4ec3d2311933".into(),
            address: "0x6982508145454ce325ddbe47a25d4ec3d2311933".into(),
            name: name.into(),
            network: Some("eth".into()),
            dex: None,
            price_usd: None,
            price_change_24h: Decimal::from_str("-4.2").ok(),
            image_url: None,
        }
    }

    #[test]
    fn test_short_name_takes_base_token() {
        assert_eq!(summary("PEPE / WETH").short_name(), "PEPE");
        assert_eq!(summary("BONK").short_name(), "BONK");
        assert_eq!(summary("").short_name(), "");
    }

    #[test]
    fn test_short_address_and_direction() {
        let token = summary("PEPE / WETH");
        assert_eq!(token.short_address(), "0x6982…1933");
        assert!(!token.is_price_up());
    }
}
