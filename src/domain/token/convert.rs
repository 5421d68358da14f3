//! Conversion: TokenSearchItem → TokenSummary.

use super::wire::{TokenSearchItem, TokenSearchResponse};
use super::TokenSummary;
use rust_decimal::Decimal;
use std::str::FromStr;

impl From<TokenSearchItem> for TokenSummary {
    fn from(item: TokenSearchItem) -> Self {
        let id = item.id.unwrap_or_default();
        let (network, id_address) = match id.split_once('_') {
            Some((network, address)) => (Some(network.to_string()), Some(address.to_string())),
            None => (None, None),
        };

        let attributes = item.attributes.unwrap_or_default();
        let address = item
            .address
            .or(attributes.address)
            .or(id_address)
            .unwrap_or_default();
        let name = item
            .name
            .or(attributes.name)
            .unwrap_or_else(|| address.clone());

        let price_usd = attributes
            .base_token_price_usd
            .as_deref()
            .and_then(parse_decimal);
        let price_change_24h = attributes
            .price_change_percentage
            .and_then(|p| p.h24)
            .as_deref()
            .and_then(parse_decimal);

        let dex = item
            .relationships
            .and_then(|r| r.dex)
            .and_then(|d| d.data)
            .map(|d| d.id);

        Self {
            id,
            address,
            name,
            network,
            dex,
            price_usd,
            price_change_24h,
            image_url: item.logo_url.or(item.image_url2),
        }
    }
}

impl From<TokenSearchResponse> for Vec<TokenSummary> {
    fn from(resp: TokenSearchResponse) -> Self {
        resp.data.into_iter().map(TokenSummary::from).collect()
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim())
        .or_else(|_| Decimal::from_scientific(s.trim()))
        .ok()
}
