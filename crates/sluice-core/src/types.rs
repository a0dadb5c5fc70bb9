//! Core ledger types: account identifiers and notifications.
//!
//! All monetary values are unsigned integers in the smallest asset unit.
//! Proportional math uses `u128` intermediates so that products of two
//! `u64` operands cannot overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 20-byte account identifier.
///
/// Identifies payees and deposit sources. The ledger attaches no meaning
/// to the bytes beyond equality; the all-zero identifier is reserved as
/// the null account and is rejected in payee rosters.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The null account (20 zero bytes). Never a valid payee.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Create an AccountId from a byte array.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the null account.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for AccountId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Notification emitted by every deposit.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Deposited {
    /// Account the inflow came from.
    pub source: AccountId,
    /// Amount credited to the held balance, in smallest units.
    pub amount: u64,
}

/// Notification emitted by every successful release.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Released {
    /// Payee the payment went to.
    pub payee: AccountId,
    /// Amount paid, in smallest units.
    pub amount: u64,
}

/// A ledger notification, for monitoring and indexing collaborators.
///
/// The ledger keeps only current cumulative totals; observers that need
/// history reconstruct it from the notification stream.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub enum LedgerEvent {
    /// Funds entered the pool.
    Deposited(Deposited),
    /// Funds left the pool to a payee.
    Released(Released),
}

impl From<Deposited> for LedgerEvent {
    fn from(event: Deposited) -> Self {
        Self::Deposited(event)
    }
}

impl From<Released> for LedgerEvent {
    fn from(event: Released) -> Self {
        Self::Released(event)
    }
}
