//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connection and run settings.
//! - Ensure consistent defaults and type safety across the configuration system.
//!
//! Does NOT handle:
//! - Configuration loading from environment variables or flags (see `loader` module).
//! - Actual network connections or authentication flows (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

mod auth;
mod connection;

pub use auth::{AuthStrategy, KEYRING_SERVICE, LoginEncoding, SecureValue};
pub use connection::{Config, ConnectionConfig, RunConfig};
