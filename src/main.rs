use anyhow::{Context, Result};
use modeleval::data::read_json;
use modeleval::telemetry::Telemetry;
use modeleval::ui::cli::drivers::InquireDriver;
use modeleval::ui::cli::wizard::prompt_choice;
use modeleval::ui::types::build::run_task;
use modeleval::ui::types::choices::TaskChoice;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let task: TaskChoice = match std::env::args().nth(1) {
        Some(path) => {
            read_json(&path).with_context(|| format!("failed to read task file {path}"))?
        }
        None => prompt_choice::<TaskChoice, _>(&InquireDriver)?,
    };

    let report = run_task(&task, Telemetry::from_env()).context("task failed")?;
    if task.print_summary() {
        println!("{report}");
    }
    println!("Report written to {}", task.output_path().display());
    Ok(())
}
