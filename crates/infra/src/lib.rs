//! `coffer-infra` — account store implementations.

pub mod store;

pub use store::{InMemoryAccountStore, PgAccountStore};
