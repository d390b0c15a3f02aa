//! Shared building blocks: identifier constants and currency amounts.

pub mod fields;
pub mod units;

pub use units::{AmountError, EtherAmount};
