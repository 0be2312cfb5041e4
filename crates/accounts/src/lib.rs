//! `coffer-accounts` — the account ledger core.
//!
//! Pure balance-mutation rules, the store contract, and the service that
//! ties them to the auth collaborators.

pub mod account;
pub mod ledger;
pub mod service;
pub mod store;

pub use account::{Account, AccountId, NewAccount};
pub use service::{IssuedToken, LedgerService, TransferOutcome};
pub use store::AccountStore;
