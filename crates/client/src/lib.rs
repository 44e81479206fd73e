//! Authenticated HTTP smoke-test client.
//!
//! This crate logs in to a service once, runs a plan of HTTP probes against
//! it in order, and classifies each probe by comparing the returned status
//! with the set of acceptable statuses. Failures are collected into a
//! [`RunReport`](models::RunReport) rather than aborting the run.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod plan;
pub mod runner;
pub mod tracing;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{AuthToken, SessionManager, mask_secret};
pub use client::ProbeClient;
pub use client::builder::ProbeClientBuilder;
pub use endpoints::RetryPolicy;
pub use error::{ClientError, Result, TransportKind};
pub use models::{
    ExpectedStatus, HealthStatus, HttpMethod, ProbeBody, ProbeRequest, ProbeResult, RunOutcome,
    RunReport, RunSummary,
};
pub use plan::{PlanError, load_plan, parse_plan};
pub use probe_config::AuthStrategy;
pub use runner::SmokeRunner;
