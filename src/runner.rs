//! Sequential scenario runner.
//!
//! For every scenario: reset the fixture, run, print and record the outcome.
//! A last reset leaves the data file restored once the sequence completes.

use std::time::{Duration, Instant};

use crate::client::ApiClient;
use crate::config::{FailurePolicy, HarnessConfig};
use crate::error::Result;
use crate::fixture::{FileFixture, Reset, ResetOutcome};
use crate::scenarios::{self, Outcome, Scenario};

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub requirement: &'static str,
    pub reset: ResetOutcome,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<ScenarioReport>,
    /// True when a failure stopped the sequence before its end.
    pub aborted: bool,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Passed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

pub struct Runner {
    api: ApiClient,
    fixture: Box<dyn Reset>,
    scenarios: Vec<Box<dyn Scenario>>,
    policy: FailurePolicy,
}

impl Runner {
    /// Runner over the full scenario sequence, resetting via the data file.
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        let fixture = FileFixture::new(config, api.clone());
        Ok(Self::new(
            api,
            Box::new(fixture),
            scenarios::all(),
            config.failure_policy,
        ))
    }

    pub fn new(
        api: ApiClient,
        fixture: Box<dyn Reset>,
        scenarios: Vec<Box<dyn Scenario>>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            api,
            fixture,
            scenarios,
            policy,
        }
    }

    /// Keep only the named scenario.
    pub fn select(mut self, name: &str) -> Result<Self> {
        let only = scenarios::by_name(name)?;
        self.scenarios = vec![only];
        Ok(self)
    }

    pub fn scenario_names(&self) -> Vec<&'static str> {
        self.scenarios.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self) -> RunSummary {
        tracing::info!(
            "Running {} scenario(s) against {} (on failure: {})",
            self.scenarios.len(),
            self.api.base_url(),
            self.policy
        );

        let mut summary = RunSummary::default();

        for scenario in &self.scenarios {
            let reset = self.reset().await;

            println!("\n>>> Running {} ({}) <<<", scenario.name(), scenario.requirement());
            let started = Instant::now();
            let outcome = match scenario.run(&self.api).await {
                Ok(outcome) => outcome,
                Err(e) => Outcome::Failed(e.to_string()),
            };
            let elapsed = started.elapsed();
            println!(">>> {} {} <<<", scenario.name(), outcome);

            let failed = outcome.is_failure();
            summary.reports.push(ScenarioReport {
                name: scenario.name(),
                requirement: scenario.requirement(),
                reset,
                outcome,
                elapsed,
            });

            if failed && self.policy == FailurePolicy::Abort {
                summary.aborted = true;
                tracing::warn!("Stopping after failed scenario {}", scenario.name());
                return summary;
            }
        }

        self.reset().await;
        summary
    }

    async fn reset(&self) -> ResetOutcome {
        let outcome = self.fixture.reset().await;
        if !outcome.is_restored() {
            println!("  Fixture reset {}", outcome);
        }
        outcome
    }
}

/// Print the per-scenario table and totals.
pub fn print_summary(summary: &RunSummary) {
    println!("\n=== Summary ===");
    for report in &summary.reports {
        println!(
            "  {:<22} {:<6} {:>6}ms  {}",
            report.name,
            report.requirement,
            report.elapsed.as_millis(),
            report.outcome
        );
    }
    println!(
        "\n{} passed, {} skipped, {} failed{}",
        summary.passed(),
        summary.skipped(),
        summary.failed(),
        if summary.aborted { " (aborted)" } else { "" }
    );
}
