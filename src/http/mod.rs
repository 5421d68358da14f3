//! HTTP client layer: `DexHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::DexHttp;
pub use retry::{RetryConfig, RetryPolicy};
