//! Outcome classification, the result histogram, and the shared aggregator.
mod aggregator;
mod histogram;
mod types;


pub use aggregator::{AggregateSnapshot, Aggregator};
pub use histogram::ResultHistogram;
pub use types::{Outcome, OutcomeKey, RunStats, SUCCESS_STATUS};
