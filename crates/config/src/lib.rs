//! Configuration management for the smoke-probe runner.
//!
//! This crate provides types and loaders for the connection, credential and
//! run settings of a smoke run, sourced from `.env` files, environment
//! variables and command-line overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{
    AuthStrategy, Config, ConnectionConfig, KEYRING_SERVICE, LoginEncoding, RunConfig,
    SecureValue,
};
