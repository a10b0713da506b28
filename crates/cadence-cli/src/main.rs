//! Cadence CLI Application
//!
//! Command-line interface for the Cadence plan scheduling tool.

mod args;
mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::{reschedule_loop, SchedulerBuilder, SweepConfig};
use clap::Parser;
use cli::{Cli, ListPlansArgs};
use log::info;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        json,
        command,
    } = Args::parse();

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let cli = Cli::new(scheduler, user, json);

    info!("Cadence started");

    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Calendar(args)) => cli.calendar(args).await,
        Some(Commands::Sweep) => cli.sweep_once().await,
        Some(Commands::Watch(args)) => {
            let config = SweepConfig {
                interval: Duration::from_secs(args.interval_seconds),
                ..Default::default()
            };
            let scheduler = Arc::new(cli.into_scheduler());

            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let sweep = tokio::spawn(reschedule_loop(scheduler, config, shutdown_rx));

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for shutdown signal")?;
            info!("Interrupt received, stopping sweep");
            let _ = shutdown_tx.send(true);

            let totals = sweep.await.context("Sweep task panicked")?;
            println!("{totals}");
            Ok(())
        }
        None => {
            cli.list_plans(ListPlansArgs {
                category: None,
                status: None,
            })
            .await
        }
    }
}
