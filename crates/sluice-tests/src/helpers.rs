//! Shared test helpers for the integration and adversarial suites.

use sluice_core::ledger::Ledger;
use sluice_core::types::AccountId;
use sluice_core::vault::MemoryVault;

/// Simple account identifier from a seed byte.
pub fn acct(seed: u8) -> AccountId {
    AccountId([seed; 20])
}

/// Distinct non-null identifiers for an `n`-payee roster.
pub fn roster(n: usize) -> Vec<AccountId> {
    (0..n).map(|i| acct(i as u8 + 1)).collect()
}

/// Ledger over a fresh in-memory vault.
pub fn make_ledger(payees: &[AccountId], shares: &[u64]) -> Ledger<MemoryVault> {
    Ledger::new(MemoryVault::new(), payees, shares).unwrap()
}

/// Sum of deposits so far must equal held balance plus total released.
pub fn assert_sum_invariant(ledger: &Ledger<MemoryVault>, deposited: u64) {
    assert_eq!(
        ledger.held_balance().unwrap() + ledger.total_released(),
        deposited,
        "sum invariant violated",
    );
}
