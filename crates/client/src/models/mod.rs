//! Data models for probes, their results and run reports.
//!
//! Types are organized by concern in submodules and re-exported here
//! for convenient access.

pub mod health;
pub mod probe;
pub mod report;
pub mod result;

pub use health::HealthStatus;
pub use probe::{ExpectedStatus, HttpMethod, ProbeBody, ProbeRequest};
pub use report::{RunOutcome, RunReport, RunSummary};
pub use result::ProbeResult;
