//! Error types for the Sluice ledger.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("length mismatch: {payees} payees, {shares} share counts")] LengthMismatch { payees: usize, shares: usize },
    #[error("empty roster")] EmptyRoster,
    #[error("null payee at index {index}")] NullPayee { index: usize },
    #[error("zero shares at index {index}")] ZeroShares { index: usize },
    #[error("duplicate payee: {0}")] DuplicatePayee(String),
    #[error("total shares overflow")] SharesOverflow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("not a payee: {0}")] NotAPayee(String),
    #[error("nothing due for payee: {0}")] NothingDue(String),
    #[error("value overflow")] ValueOverflow,
    #[error("vault: {0}")] Vault(#[from] VaultError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster index out of range: {index} >= {len}")] OutOfRange { index: usize, len: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("held balance overflow")] BalanceOverflow,
    #[error("insufficient funds: have {have}, need {need}")] InsufficientFunds { have: u64, need: u64 },
    #[error("recipient unavailable: {0}")] RecipientUnavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error("length mismatch: {payees} payees, {released} released amounts")] LengthMismatch { payees: usize, released: usize },
    #[error("total released mismatch: recorded {recorded}, sum {sum}")] TotalMismatch { recorded: u64, sum: u64 },
    #[error("serialization: {0}")] Serialization(String),
}

#[derive(Error, Debug)]
pub enum SluiceError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error(transparent)] Release(#[from] ReleaseError),
    #[error(transparent)] Roster(#[from] RosterError),
    #[error(transparent)] Vault(#[from] VaultError),
    #[error(transparent)] Snapshot(#[from] SnapshotError),
}
