//! Host value-transfer interface and in-memory implementation.
//!
//! The ledger never bookkeeps the pooled balance itself — the host
//! environment owns it, and the ledger reads it live through [`Vault`]
//! on every release computation. Keeping a single source of truth for
//! "funds received" is deliberate; a parallel deposit ledger could
//! desynchronize from the real balance.
//!
//! [`MemoryVault`] is suitable for tests and single-process embeddings;
//! production hosts implement [`Vault`] over their own asset primitive.

use std::collections::{HashMap, HashSet};

use crate::error::VaultError;
use crate::types::AccountId;

/// Host-environment custody of the pooled asset.
///
/// Implementations must be atomic per call: a failed `transfer` leaves
/// the balance untouched, and `balance` reads are synchronized with
/// in-flight transfers.
pub trait Vault: Send + Sync {
    /// Current held balance of the pool, in smallest units.
    fn balance(&self) -> Result<u64, VaultError>;

    /// Credit the pool with an inflow. Zero amounts are legal and inert.
    fn deposit(&mut self, amount: u64) -> Result<(), VaultError>;

    /// Move `amount` units from the pool to `to`.
    ///
    /// # Errors
    ///
    /// - [`VaultError::InsufficientFunds`] if the pool holds less than `amount`
    /// - [`VaultError::RecipientUnavailable`] if `to` cannot accept the asset
    fn transfer(&mut self, to: &AccountId, amount: u64) -> Result<(), VaultError>;
}

/// In-memory vault for tests and single-process embeddings.
///
/// Tracks the pool balance and per-account credited totals in plain
/// maps, with checked arithmetic throughout. Recipients can be marked
/// unavailable to exercise transfer-failure paths.
#[derive(Debug)]
pub struct MemoryVault {
    /// Current pool balance in smallest units.
    balance: u64,
    /// Cumulative amount transferred to each account.
    credited: HashMap<AccountId, u64>,
    /// Accounts that currently reject incoming transfers.
    unavailable: HashSet<AccountId>,
}

impl MemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self {
            balance: 0,
            credited: HashMap::new(),
            unavailable: HashSet::new(),
        }
    }

    /// Create a vault seeded with an initial balance.
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            credited: HashMap::new(),
            unavailable: HashSet::new(),
        }
    }

    /// Cumulative amount transferred to `account` so far.
    pub fn credited(&self, account: &AccountId) -> u64 {
        self.credited.get(account).copied().unwrap_or(0)
    }

    /// Sum of all outbound transfers.
    pub fn total_credited(&self) -> u64 {
        self.credited.values().sum()
    }

    /// Make `account` reject incoming transfers.
    pub fn set_unavailable(&mut self, account: AccountId) {
        self.unavailable.insert(account);
    }

    /// Let `account` accept incoming transfers again.
    pub fn set_available(&mut self, account: &AccountId) {
        self.unavailable.remove(account);
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl Vault for MemoryVault {
    fn balance(&self) -> Result<u64, VaultError> {
        Ok(self.balance)
    }

    fn deposit(&mut self, amount: u64) -> Result<(), VaultError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow)?;
        Ok(())
    }

    fn transfer(&mut self, to: &AccountId, amount: u64) -> Result<(), VaultError> {
        if self.unavailable.contains(to) {
            return Err(VaultError::RecipientUnavailable(to.to_string()));
        }
        if self.balance < amount {
            return Err(VaultError::InsufficientFunds {
                have: self.balance,
                need: amount,
            });
        }
        let credited = self.credited.entry(*to).or_insert(0);
        *credited = credited
            .checked_add(amount)
            .ok_or(VaultError::BalanceOverflow)?;
        self.balance -= amount;
        Ok(())
    }
}
