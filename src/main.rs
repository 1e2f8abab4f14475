use std::process::ExitCode;

use bankers_safety::report::render_report;
use bankers_safety::scenario::{Scenario, ScenarioRunner};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let scenario = Scenario::default();
    let runner = match ScenarioRunner::prepare(&scenario) {
        Ok(runner) => runner,
        Err(err) => {
            error!(error = %err, "scenario rejected");
            return ExitCode::FAILURE;
        }
    };

    let trials = runner.run_trials(&scenario.candidates);
    print!("{}", render_report(&runner, &trials));

    ExitCode::SUCCESS
}
