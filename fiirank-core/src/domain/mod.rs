//! Domain types for fiirank

pub mod fund;

pub use fund::{columns, FundRecord, RankedFund};

/// Ticker type alias
pub type Ticker = String;
