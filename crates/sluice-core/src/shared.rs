//! Thread-safe ledger handle.
//!
//! [`Ledger`] itself is single-writer (`&mut self`). [`SharedLedger`]
//! wraps it in an `Arc<parking_lot::Mutex<..>>` so that the whole
//! read-compute-commit-transfer sequence of a release executes under
//! one ledger-scoped lock. Two concurrent releases for the same payee
//! serialize, and the loser observes the updated released table and
//! fails with `NothingDue` instead of double-paying.
//!
//! Read queries also take the lock, so they observe a consistent
//! snapshot relative to in-flight operations.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{ReleaseError, RosterError, VaultError};
use crate::ledger::Ledger;
use crate::snapshot::LedgerSnapshot;
use crate::types::{AccountId, Deposited, Released};
use crate::vault::Vault;

/// Clonable, thread-safe handle to a [`Ledger`].
pub struct SharedLedger<V: Vault> {
    inner: Arc<Mutex<Ledger<V>>>,
}

impl<V: Vault> Clone for SharedLedger<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Vault> SharedLedger<V> {
    /// Wrap a ledger for shared use.
    pub fn new(ledger: Ledger<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Credit the pool with an inflow. See [`Ledger::deposit`].
    pub fn deposit(&self, source: AccountId, amount: u64) -> Result<Deposited, VaultError> {
        self.inner.lock().deposit(source, amount)
    }

    /// Pay `payee` everything currently due. See [`Ledger::release`].
    ///
    /// The entire release algorithm runs under the ledger lock.
    pub fn release(&self, payee: &AccountId) -> Result<Released, ReleaseError> {
        self.inner.lock().release(payee)
    }

    /// Amount a release would pay right now. See [`Ledger::releasable`].
    pub fn releasable(&self, payee: &AccountId) -> Result<u64, ReleaseError> {
        self.inner.lock().releasable(payee)
    }

    /// Sum of all share counts.
    pub fn total_shares(&self) -> u64 {
        self.inner.lock().total_shares()
    }

    /// Sum of all amounts ever paid out.
    pub fn total_released(&self) -> u64 {
        self.inner.lock().total_released()
    }

    /// Share count held by `account`, 0 if not a payee.
    pub fn shares(&self, account: &AccountId) -> u64 {
        self.inner.lock().shares(account)
    }

    /// Cumulative amount paid to `account`, 0 if never paid.
    pub fn released(&self, account: &AccountId) -> u64 {
        self.inner.lock().released(account)
    }

    /// Payee at `index` in constructor order.
    pub fn payee_at(&self, index: usize) -> Result<AccountId, RosterError> {
        self.inner.lock().payee_at(index)
    }

    /// Number of payees in the roster.
    pub fn roster_len(&self) -> usize {
        self.inner.lock().roster_len()
    }

    /// Live held balance of the pool.
    pub fn held_balance(&self) -> Result<u64, VaultError> {
        self.inner.lock().held_balance()
    }

    /// Capture the current accounting state under the lock.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.lock().snapshot()
    }

    /// Run `f` with read access to the ledger under the lock.
    ///
    /// Useful when a caller needs several queries to come from one
    /// consistent snapshot.
    pub fn with_read<R>(&self, f: impl FnOnce(&Ledger<V>) -> R) -> R {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::MemoryVault;
    use std::thread;

    fn acct(seed: u8) -> AccountId {
        AccountId([seed; 20])
    }

    fn shared_abc() -> SharedLedger<MemoryVault> {
        let ledger = Ledger::new(
            MemoryVault::new(),
            &[acct(0xA), acct(0xB), acct(0xC)],
            &[50, 30, 20],
        )
        .unwrap();
        SharedLedger::new(ledger)
    }

    #[test]
    fn shared_handle_round_trip() {
        let shared = shared_abc();
        shared.deposit(acct(0xD), 100).unwrap();
        assert_eq!(shared.release(&acct(0xA)).unwrap().amount, 50);
        assert_eq!(shared.total_released(), 50);
        assert_eq!(shared.held_balance().unwrap(), 50);
        assert_eq!(shared.shares(&acct(0xB)), 30);
        assert_eq!(shared.released(&acct(0xB)), 0);
        assert_eq!(shared.payee_at(2).unwrap(), acct(0xC));
        assert_eq!(shared.roster_len(), 3);
    }

    #[test]
    fn clone_shares_state() {
        let shared = shared_abc();
        let other = shared.clone();
        shared.deposit(acct(0xD), 100).unwrap();
        assert_eq!(other.held_balance().unwrap(), 100);
        other.release(&acct(0xB)).unwrap();
        assert_eq!(shared.total_released(), 30);
    }

    #[test]
    fn with_read_gives_consistent_view() {
        let shared = shared_abc();
        shared.deposit(acct(0xD), 100).unwrap();
        let (held, released) = shared.with_read(|l| {
            (l.held_balance().unwrap(), l.total_released())
        });
        assert_eq!(held + released, 100);
    }

    #[test]
    fn concurrent_releases_never_double_pay() {
        let shared = shared_abc();
        shared.deposit(acct(0xD), 100).unwrap();

        // Many threads race to release the same payee; exactly one may win
        // per deposit round.
        let mut handles = Vec::new();
        for _ in 0..8 {
            let handle = shared.clone();
            handles.push(thread::spawn(move || handle.release(&acct(0xA)).is_ok()));
        }
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(shared.released(&acct(0xA)), 50);
        assert_eq!(shared.total_released(), 50);
        assert_eq!(shared.with_read(|l| l.vault().credited(&acct(0xA))), 50);
    }

    #[test]
    fn concurrent_mixed_operations_preserve_sum_invariant() {
        let shared = shared_abc();

        let mut handles = Vec::new();
        for i in 0..4u8 {
            let handle = shared.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..25 {
                    handle.deposit(acct(0xD0 + i), 10).unwrap();
                    let _ = handle.release(&acct(0xA));
                    let _ = handle.release(&acct(0xB));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let _ = shared.release(&acct(0xC));

        // 4 threads × 25 deposits × 10 units.
        let deposited = 1_000u64;
        assert_eq!(
            shared.held_balance().unwrap() + shared.total_released(),
            deposited
        );
        let sum: u64 = (0..shared.roster_len())
            .map(|i| shared.released(&shared.payee_at(i).unwrap()))
            .sum();
        assert_eq!(sum, shared.total_released());
    }
}
