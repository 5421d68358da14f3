//! Wire types for token search responses (REST).
//!
//! The search endpoint returns pool records in a JSON:API-like envelope. Every
//! field is optional on the wire; missing data degrades to empty values.

use serde::{Deserialize, Serialize};

/// `GET /api/tokens/search` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSearchResponse {
    #[serde(default)]
    pub data: Vec<TokenSearchItem>,
}

/// One pool/token record. `id` is `"{network}_{address}"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSearchItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Option<TokenAttributes>,
    #[serde(default)]
    pub relationships: Option<TokenRelationships>,
    #[serde(default, rename = "imageUrl2", skip_serializing_if = "Option::is_none")]
    pub image_url2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// USD price as a decimal string.
    #[serde(default)]
    pub base_token_price_usd: Option<String>,
    #[serde(default)]
    pub price_change_percentage: Option<PriceChangePercentage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceChangePercentage {
    #[serde(default)]
    pub h24: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRelationships {
    #[serde(default)]
    pub dex: Option<RelationshipRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRef {
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipData {
    pub id: String,
}
