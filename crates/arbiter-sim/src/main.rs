//! Scripted guard simulation driving the goal scheduler frame by frame.
mod config;
mod scenario;
mod world;

use anyhow::{Context, Result};
use config::SimConfig;
use scenario::Simulation;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::debug!(?config, "simulation configured");

    let mut sim =
        Simulation::new(config.clone()).context("failed to build guard goal scheduler")?;
    sim.run();

    println!("frame  goal");
    for (frame, goal) in sim.timeline() {
        println!("{frame:>5}  {goal}");
    }
    println!();
    for event in &sim.world().events {
        println!("- {event}");
    }

    if config.report_json {
        let snapshot = sim.scheduler().snapshot();
        let json =
            serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        println!("{json}");
    }

    Ok(())
}
