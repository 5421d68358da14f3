//! Display formatting for chart labels.

pub mod price;
