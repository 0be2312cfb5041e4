//! `coffer-auth` — authentication boundary (password hashing + tokens).
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::{AuthClaims, TokenValidationError, validate_claims};
pub use password::{PasswordHashError, PasswordVault};
pub use token::{Hs256TokenService, TokenError, TokenService};
