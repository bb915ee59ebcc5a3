//! Smoke tests for the profissionais / alunos / atendimentos mock API.
//!
//! The external API is a json-server style process that serves a JSON data
//! file. This crate restores that file from a snapshot before each scenario,
//! then drives a fixed sequence of HTTP scenarios and reports pass, skip or
//! failure for each.

pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod runner;
pub mod scenarios;
pub mod types;

// Primary exports
pub use client::{ApiClient, ApiResponse};
pub use config::{FailurePolicy, HarnessConfig, HarnessConfigBuilder, Settle};
pub use error::{Error, Result};
pub use fixture::{FileFixture, Reset, ResetOutcome, Snapshot};
pub use runner::{RunSummary, Runner, ScenarioReport};
pub use scenarios::{Outcome, Scenario};
pub use types::*;

