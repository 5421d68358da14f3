//! Shared newtypes and utilities used across all modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw strings the charting widget and the backend exchange.

pub mod fmt;
pub mod scale;

pub use fmt::price::{format_price, parse_price, PriceFormatter};
pub use scale::{price_decimals, price_scale, DEFAULT_PRICE_SCALE};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::str::FromStr;

// ─── SymbolName ──────────────────────────────────────────────────────────────

/// Newtype for chart symbol names (e.g. `"PEPE/WETH"`).
///
/// Symbol names are the registry key and the string the widget hands back to
/// the datafeed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolName(String);

impl SymbolName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SymbolName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for SymbolName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SymbolName(s.to_string()))
    }
}

impl Serialize for SymbolName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SymbolName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SymbolName(s))
    }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Bar resolution, in the widget's resolution-string vocabulary.
///
/// Plain numbers are minutes; `S`, `D`, `W` and `M` suffixes are seconds, days,
/// weeks and months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1S")]
    Second1,
    #[serde(rename = "10")]
    Minute10,
    #[serde(rename = "15")]
    Minute15,
    #[serde(rename = "30")]
    Minute30,
    #[serde(rename = "60")]
    Hour1,
    #[default]
    #[serde(rename = "240")]
    Hour4,
    #[serde(rename = "480")]
    Hour8,
    #[serde(rename = "720")]
    Hour12,
    #[serde(rename = "1440")]
    Day1,
    #[serde(rename = "3D")]
    Day3,
    #[serde(rename = "W")]
    Week1,
    #[serde(rename = "M")]
    Month1,
}

impl Resolution {
    /// Every resolution the datafeed advertises, in ascending order.
    pub const SUPPORTED: [Resolution; 12] = [
        Self::Second1,
        Self::Minute10,
        Self::Minute15,
        Self::Minute30,
        Self::Hour1,
        Self::Hour4,
        Self::Hour8,
        Self::Hour12,
        Self::Day1,
        Self::Day3,
        Self::Week1,
        Self::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Second1 => "1S",
            Self::Minute10 => "10",
            Self::Minute15 => "15",
            Self::Minute30 => "30",
            Self::Hour1 => "60",
            Self::Hour4 => "240",
            Self::Hour8 => "480",
            Self::Hour12 => "720",
            Self::Day1 => "1440",
            Self::Day3 => "3D",
            Self::Week1 => "W",
            Self::Month1 => "M",
        }
    }

    /// Nominal duration of one bar in seconds (months count as 30 days).
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Second1 => 1,
            Self::Minute10 => 600,
            Self::Minute15 => 900,
            Self::Minute30 => 1_800,
            Self::Hour1 => 3_600,
            Self::Hour4 => 14_400,
            Self::Hour8 => 28_800,
            Self::Hour12 => 43_200,
            Self::Day1 => 86_400,
            Self::Day3 => 259_200,
            Self::Week1 => 604_800,
            Self::Month1 => 2_592_000,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unsupported resolution: {}", s))
    }
}

// ─── Theme ───────────────────────────────────────────────────────────────────

/// Widget color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Shorten an on-chain address for list display.
///
/// Format: `{address[0:6]}…{address[-4:]}`; addresses of ten characters or
/// fewer are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
