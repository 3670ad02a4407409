//! Insurance Company Simulator Binary
//!
//! Runs the scripted timeline and prints the final report as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin insurance-sim
//!
//! # Simulate two years starting mid-month, with debug logs as JSON
//! SIM_START=2024-03-15T08:00:00 SIM_MONTHS=24 SIM_LOG_LEVEL=debug SIM_LOG_JSON=true \
//!     cargo run --bin insurance-sim
//! ```
//!
//! # Environment Variables
//!
//! * `SIM_START` - Initial logical time (default: 2024-01-01T00:00:00)
//! * `SIM_MONTHS` - Number of simulated months (default: 12)
//! * `SIM_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `SIM_LOG_JSON` - Emit JSON log lines (default: false)
//! * `INSURANCE_*` - Underwriting rule overrides, e.g. `INSURANCE_TOTAL_LOSS_RATIO`

use anyhow::Context;
use domain_company::UnderwritingRules;
use interface_cli::config::SimulatorConfig;
use interface_cli::scenario::run_simulation_with_rules;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = SimulatorConfig::from_env().context("loading simulator configuration")?;
    init_tracing(&config.log_level, config.log_json);

    let rules = UnderwritingRules::from_env().context("loading underwriting rules")?;
    tracing::info!(?rules, "Underwriting rules loaded");

    let report = run_simulation_with_rules(&config, rules).context("running simulation")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(
        end = %report.end,
        total_charged = report.total_charged(),
        settlements = report.settlements.len(),
        "Simulation complete"
    );
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
