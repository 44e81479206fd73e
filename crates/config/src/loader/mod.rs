//! Configuration loader for `.env` files, environment variables and flags.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//! - Validate the merged values and resolve the authentication strategy.
//!
//! Does NOT handle:
//! - Persisting configuration anywhere; a run's config lives only in memory.
//! - Interaction with system keyrings directly (delegated to `SecureValue::resolve()`).
//!
//! Invariants / Assumptions:
//! - Builder methods (CLI flags) take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
