//! HTTP endpoint implementations.
//!
//! Free functions taking a `reqwest::Client` and a normalized base URL, so
//! they can be exercised directly against a mock server.

mod auth;
mod health;
mod probe;
pub mod request;

pub use auth::login;
pub use health::get_health;
pub use probe::send_probe;
pub use request::{RetryPolicy, body_snippet, send_with_retry};
