//! Integration and adversarial test suite for Sluice.
//!
//! This crate contains end-to-end tests that drive the ledger through
//! realistic deposit/release sequences and property tests that attempt
//! to break the accounting invariants under randomized inputs.

pub mod helpers;
