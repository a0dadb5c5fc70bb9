//! The proportional-share ledger.
//!
//! A [`Ledger`] owns an immutable allocation table (payee → shares), a
//! released table (payee → cumulative amount paid), the aggregate
//! counters, and the host [`Vault`]. A payee's all-time entitlement is
//! `floor(total_received × shares / total_shares)` where
//! `total_received` is the live held balance plus everything released
//! so far; [`release`](Ledger::release) pays out the part of that
//! entitlement not yet paid.
//!
//! Floor-division dust stays in the pool and re-enters the entitlement
//! computation on later releases, so no payee is ever short by more
//! than `total_shares − 1` smallest units at any snapshot.
//!
//! Not thread-safe — mutation goes through `&mut self`. Concurrent
//! embeddings wrap the ledger in [`SharedLedger`](crate::shared::SharedLedger)
//! so every release executes under one ledger-scoped lock.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{ConfigError, ReleaseError, RosterError, SnapshotError, VaultError};
use crate::snapshot::LedgerSnapshot;
use crate::types::{AccountId, Deposited, Released};
use crate::vault::Vault;

/// Proportional-share pull-payment ledger over a host vault.
#[derive(Debug)]
pub struct Ledger<V: Vault> {
    /// Allocation table: payee → share count. Fixed at construction.
    shares: HashMap<AccountId, u64>,
    /// Payees in constructor order. Fixed at construction.
    roster: Vec<AccountId>,
    /// Cumulative amount paid per payee. Absent entry means 0.
    released: HashMap<AccountId, u64>,
    /// Sum of all share counts. Cached for O(1) division.
    total_shares: u64,
    /// Sum of all amounts ever paid out.
    total_released: u64,
    /// Host custody of the pooled asset.
    vault: V,
}

impl<V: Vault> Ledger<V> {
    /// Create a ledger over `vault` with the given payees and shares.
    ///
    /// Entries are committed pairwise in the given order. Construction
    /// is atomic: any validation failure returns an error and no ledger
    /// exists. The allocation table and roster are immutable afterwards
    /// by design — no mutating API exists.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::LengthMismatch`] if the lists differ in length
    /// - [`ConfigError::EmptyRoster`] if no payees are given
    /// - [`ConfigError::NullPayee`] if a payee is the null account
    /// - [`ConfigError::ZeroShares`] if a share count is zero
    /// - [`ConfigError::DuplicatePayee`] if an identifier repeats
    /// - [`ConfigError::SharesOverflow`] if the share counts overflow u64
    pub fn new(vault: V, payees: &[AccountId], shares: &[u64]) -> Result<Self, ConfigError> {
        if payees.len() != shares.len() {
            return Err(ConfigError::LengthMismatch {
                payees: payees.len(),
                shares: shares.len(),
            });
        }
        if payees.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut table = HashMap::with_capacity(payees.len());
        let mut roster = Vec::with_capacity(payees.len());
        let mut total_shares = 0u64;
        for (index, (payee, &count)) in payees.iter().zip(shares).enumerate() {
            if payee.is_zero() {
                return Err(ConfigError::NullPayee { index });
            }
            if count == 0 {
                return Err(ConfigError::ZeroShares { index });
            }
            if table.contains_key(payee) {
                return Err(ConfigError::DuplicatePayee(payee.to_string()));
            }
            table.insert(*payee, count);
            roster.push(*payee);
            total_shares = total_shares
                .checked_add(count)
                .ok_or(ConfigError::SharesOverflow)?;
        }

        Ok(Self {
            shares: table,
            roster,
            released: HashMap::new(),
            total_shares,
            total_released: 0,
            vault,
        })
    }

    /// Credit the pool with an inflow from `source`.
    ///
    /// Touches no ledger tables; the held balance is owned by the vault
    /// and read live on release. Zero amounts are legal and inert.
    pub fn deposit(&mut self, source: AccountId, amount: u64) -> Result<Deposited, VaultError> {
        self.vault.deposit(amount)?;
        debug!(source = %source, amount, "deposit received");
        Ok(Deposited { source, amount })
    }

    /// Pay `payee` everything currently due to them.
    ///
    /// Callable on behalf of any payee — payment always flows to
    /// `payee` regardless of who triggers it. The released tables are
    /// committed strictly before the vault transfer, so a re-entrant
    /// computation observes the updated totals and lands on
    /// `NothingDue`; a failed transfer rolls the commit back.
    ///
    /// # Errors
    ///
    /// - [`ReleaseError::NotAPayee`] if `payee` holds no shares
    /// - [`ReleaseError::NothingDue`] if the due amount is zero
    /// - [`ReleaseError::Vault`] if the transfer fails (state unchanged)
    pub fn release(&mut self, payee: &AccountId) -> Result<Released, ReleaseError> {
        let share_count = *self
            .shares
            .get(payee)
            .ok_or_else(|| ReleaseError::NotAPayee(payee.to_string()))?;
        let already = self.released.get(payee).copied().unwrap_or(0);
        let due = self
            .entitlement(share_count)?
            .checked_sub(already)
            .ok_or(ReleaseError::ValueOverflow)?;
        if due == 0 {
            return Err(ReleaseError::NothingDue(payee.to_string()));
        }

        let new_total = self
            .total_released
            .checked_add(due)
            .ok_or(ReleaseError::ValueOverflow)?;

        // Commit before the external transfer.
        self.released.insert(*payee, already + due);
        self.total_released = new_total;

        if let Err(err) = self.vault.transfer(payee, due) {
            // All-or-nothing: undo the commit so the payee can retry.
            if already == 0 {
                self.released.remove(payee);
            } else {
                self.released.insert(*payee, already);
            }
            self.total_released -= due;
            warn!(payee = %payee, amount = due, %err, "transfer failed, release rolled back");
            return Err(ReleaseError::Vault(err));
        }

        info!(payee = %payee, amount = due, "released");
        Ok(Released { payee: *payee, amount: due })
    }

    /// Amount a release for `payee` would pay right now, without committing.
    ///
    /// # Errors
    ///
    /// - [`ReleaseError::NotAPayee`] if `payee` holds no shares
    pub fn releasable(&self, payee: &AccountId) -> Result<u64, ReleaseError> {
        let share_count = *self
            .shares
            .get(payee)
            .ok_or_else(|| ReleaseError::NotAPayee(payee.to_string()))?;
        let already = self.released.get(payee).copied().unwrap_or(0);
        self.entitlement(share_count)?
            .checked_sub(already)
            .ok_or(ReleaseError::ValueOverflow)
    }

    /// All-time proportional entitlement for a share count, floored.
    ///
    /// Reads the held balance fresh from the vault — never cached — so
    /// lingering floor-division dust re-enters the computation.
    fn entitlement(&self, share_count: u64) -> Result<u64, ReleaseError> {
        let held = self.vault.balance()?;
        let total_received = held as u128 + self.total_released as u128;
        let owed = total_received * share_count as u128 / self.total_shares as u128;
        u64::try_from(owed).map_err(|_| ReleaseError::ValueOverflow)
    }

    /// Sum of all share counts.
    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Sum of all amounts ever paid out.
    pub fn total_released(&self) -> u64 {
        self.total_released
    }

    /// Share count held by `account`, 0 if not a payee.
    pub fn shares(&self, account: &AccountId) -> u64 {
        self.shares.get(account).copied().unwrap_or(0)
    }

    /// Cumulative amount paid to `account`, 0 if never paid.
    pub fn released(&self, account: &AccountId) -> u64 {
        self.released.get(account).copied().unwrap_or(0)
    }

    /// Payee at `index` in constructor order.
    ///
    /// # Errors
    ///
    /// - [`RosterError::OutOfRange`] if `index >= roster_len()`
    pub fn payee_at(&self, index: usize) -> Result<AccountId, RosterError> {
        self.roster.get(index).copied().ok_or(RosterError::OutOfRange {
            index,
            len: self.roster.len(),
        })
    }

    /// Number of payees in the roster.
    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    /// Iterate over the roster in constructor order.
    pub fn payees(&self) -> impl Iterator<Item = &AccountId> {
        self.roster.iter()
    }

    /// Live held balance of the pool.
    pub fn held_balance(&self) -> Result<u64, VaultError> {
        self.vault.balance()
    }

    /// Read access to the host vault.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Tear down the ledger and recover the vault.
    pub fn into_vault(self) -> V {
        self.vault
    }

    /// Capture the current accounting state for persistence.
    ///
    /// The snapshot carries the roster, shares, and released amounts in
    /// constructor order, plus `total_released`. The held balance is
    /// not part of ledger state and is not captured.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let released = self.roster.iter().map(|p| self.released(p)).collect();
        let shares = self.roster.iter().map(|p| self.shares(p)).collect();
        LedgerSnapshot {
            payees: self.roster.clone(),
            shares,
            released,
            total_released: self.total_released,
        }
    }

    /// Rebuild a ledger over `vault` from a snapshot.
    ///
    /// Re-runs the full configuration validation and checks that the
    /// released amounts are internally consistent, so a corrupted
    /// snapshot can never produce a ledger violating the core
    /// invariants.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::Config`] if the roster or shares fail validation
    /// - [`SnapshotError::LengthMismatch`] if the released list is misaligned
    /// - [`SnapshotError::TotalMismatch`] if `total_released` is not the
    ///   sum of the released amounts
    pub fn restore(vault: V, snapshot: &LedgerSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.payees.len() != snapshot.released.len() {
            return Err(SnapshotError::LengthMismatch {
                payees: snapshot.payees.len(),
                released: snapshot.released.len(),
            });
        }
        let mut ledger = Self::new(vault, &snapshot.payees, &snapshot.shares)?;

        let mut sum = 0u64;
        for (payee, &amount) in snapshot.payees.iter().zip(&snapshot.released) {
            sum = sum.checked_add(amount).ok_or(SnapshotError::TotalMismatch {
                recorded: snapshot.total_released,
                sum: u64::MAX,
            })?;
            if amount > 0 {
                ledger.released.insert(*payee, amount);
            }
        }
        if sum != snapshot.total_released {
            return Err(SnapshotError::TotalMismatch {
                recorded: snapshot.total_released,
                sum,
            });
        }
        ledger.total_released = snapshot.total_released;
        Ok(ledger)
    }
}
