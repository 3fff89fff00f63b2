//! Brand brief to creator matching, plus the billing ledger that follows a booked campaign.

pub mod billing;
pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
