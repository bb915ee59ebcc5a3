//! Smoke test runner for the mock API.
//!
//! Run all scenarios:   cargo run -- all
//! Run one scenario:    cargo run -- update_professional
//! List scenarios:      cargo run -- list
//!
//! Configuration comes from `SMOKE_*` environment variables; see `HarnessConfig::from_env`.

use std::env;

use atendimento_smoke::logging::init_logging;
use atendimento_smoke::runner::print_summary;
use atendimento_smoke::{HarnessConfig, Runner, scenarios};

fn main() {
    init_logging("warn");

    let args: Vec<String> = env::args().collect();
    let selection = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if selection == "list" {
        for scenario in scenarios::all() {
            println!("{:<22} {}", scenario.name(), scenario.requirement());
        }
        return;
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create runtime");

    match rt.block_on(run(selection)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Smoke run failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(selection: &str) -> Result<bool, anyhow::Error> {
    let config = HarnessConfig::from_env()?;
    println!("Starting smoke tests against {}", config.base_url);

    let mut runner = Runner::from_config(&config)?;
    if selection != "all" {
        runner = runner.select(selection).map_err(|e| {
            anyhow::anyhow!(
                "{} (available: all, list, {})",
                e,
                runner_names().join(", ")
            )
        })?;
    }

    let summary = runner.run().await;
    print_summary(&summary);

    if summary.is_success() {
        println!("\nAll scenarios completed");
    }
    Ok(summary.is_success())
}

fn runner_names() -> Vec<&'static str> {
    scenarios::all().iter().map(|s| s.name()).collect()
}
