//! Serializable ledger state for persistence.
//!
//! A [`LedgerSnapshot`] captures everything the ledger owns: the roster,
//! the allocation table, the released table, and `total_released` — all
//! in constructor order. The held balance belongs to the host vault and
//! is deliberately excluded; restoring a snapshot pairs it with whatever
//! vault the host supplies.
//!
//! Encoding uses bincode with standard config for deterministic bytes.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::ledger::Ledger;
use crate::types::AccountId;
use crate::vault::Vault;

/// Point-in-time accounting state of a [`Ledger`].
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct LedgerSnapshot {
    /// Payees in constructor order.
    pub payees: Vec<AccountId>,
    /// Share counts, aligned with `payees`.
    pub shares: Vec<u64>,
    /// Cumulative released amounts, aligned with `payees`.
    pub released: Vec<u64>,
    /// Sum of all amounts ever paid out.
    pub total_released: u64,
}

impl LedgerSnapshot {
    /// Capture the state of `ledger`.
    pub fn of<V: Vault>(ledger: &Ledger<V>) -> Self {
        ledger.snapshot()
    }

    /// Encode to bytes (bincode, standard config).
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Decode from bytes produced by [`to_bytes`](Self::to_bytes).
    ///
    /// Decoding checks structure only; [`Ledger::restore`] re-validates
    /// the content.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let (snapshot, _) = bincode::decode_from_slice(bytes, bincode::config::standard())
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        Ok(snapshot)
    }
}
