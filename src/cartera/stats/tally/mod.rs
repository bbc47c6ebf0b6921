//! Aggregations over the rows of a policy listing.

pub mod cross_sell;
pub mod motives;

pub use cross_sell::{CrossSellSummary, CrossSellTally};
pub use motives::MotiveTally;
