//! # sluice-core
//! Proportional-share pull-payment ledger engine.
//!
//! A [`Ledger`](ledger::Ledger) pools inflows of a single fungible asset
//! and lets a fixed roster of payees pull their proportional, cumulative
//! entitlement at any time, in any order, with no double-payment. The
//! held balance lives behind the [`Vault`](vault::Vault) seam supplied
//! by the embedding host.

pub mod error;
pub mod ledger;
pub mod shared;
pub mod snapshot;
pub mod types;
pub mod vault;
