//! Core types and operations for the weekly photo matchup.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! is reached only through the [`store::MatchupStore`] trait, which every
//! operation receives as an explicit argument.

// We intentionally use native `async fn` in traits.
#![allow(async_fn_in_trait)]

pub mod ballot;
pub mod error;
pub mod fingerprint;
pub mod item;
pub mod ledger;
pub mod matchup;
pub mod resolver;
pub mod store;
pub mod tally;
pub mod week;

pub use error::{Error, Result};
