//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs`: Rich domain types
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `From` conversions from wire to domain types
//! - `state.rs`: State containers with update methods
//! - `dialog.rs`: UI state machines driven by the host

pub mod bar;
pub mod compare;
pub mod symbol;
pub mod token;
