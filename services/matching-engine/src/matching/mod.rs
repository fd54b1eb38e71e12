//! Matching logic module
//!
//! Implements the price-time priority sweep over one side of the book

pub mod crossing;
pub mod executor;

pub use crossing::{can_match, incoming_can_match};
pub use executor::MatchExecutor;
