//! Main entry point for the Order Tuner CLI.

use anyhow::Result;
use clap::Parser;
use order_tuner::{
    cli::{self, Commands},
    settings::Settings,
    simulation::InventorySimulation,
    sweep, telemetry,
};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::Cli::parse();

    // Load settings
    let mut settings = Settings::load(args.config.as_deref())?;

    match args.command {
        Commands::Run { overrides, exploration_rate, output } => {
            overrides.apply(&mut settings);
            if let Some(rate) = exploration_rate {
                settings.optimizer.exploration_rate = rate;
            }
            settings.validate()?;
            telemetry::init(&settings.logging)?;

            let objective = InventorySimulation::new(settings.simulation.clone());
            let summary = sweep::run_single(&settings, &objective)?.summary();
            sweep::print_run_summary(&summary);

            if let Some(path) = output {
                sweep::save_report(&summary, &path)?;
            }
            Ok(())
        }
        Commands::Sweep { overrides, rates, output } => {
            overrides.apply(&mut settings);
            if let Some(rates) = rates {
                settings.sweep.exploration_rates = rates;
            }
            if output.is_some() {
                settings.sweep.output_file = output;
            }
            settings.validate()?;
            telemetry::init(&settings.logging)?;

            let objective = InventorySimulation::new(settings.simulation.clone());
            let report = sweep::run(&settings, &objective)?;
            sweep::print_sweep_summary(&report);

            if let Some(ref path) = settings.sweep.output_file {
                sweep::save_report(&report, path)?;
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}
