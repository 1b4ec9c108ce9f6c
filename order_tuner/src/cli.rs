//! Command-line interface definitions using clap derive API.

use crate::settings::Settings;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Epsilon-greedy tuner for purchase-order parameters
#[derive(Parser)]
#[command(name = "order-tuner")]
#[command(about = "Tune purchase-order dates and amounts with an epsilon-greedy bandit")]
#[command(version)]
pub struct Cli {
    /// Optional settings file layered over the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single optimization experiment
    Run {
        #[command(flatten)]
        overrides: ExperimentOverrides,

        /// Exploration rate (epsilon) in [0, 1]
        #[arg(short, long)]
        exploration_rate: Option<f64>,

        /// Write the run summary as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run one experiment per configured exploration rate
    Sweep {
        #[command(flatten)]
        overrides: ExperimentOverrides,

        /// Comma-separated exploration rates, e.g. 0,0.1,0.2
        #[arg(long, value_delimiter = ',')]
        rates: Option<Vec<f64>>,

        /// Write the sweep report as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective settings as TOML
    Config,
}

/// Settings shared by `run` and `sweep` that can be overridden per invocation.
#[derive(Args, Debug, Default)]
pub struct ExperimentOverrides {
    /// Number of iterations per experiment
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Seed for the random generator
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl ExperimentOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(iterations) = self.iterations {
            settings.optimizer.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            settings.optimizer.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::parse_from([
            "order-tuner", "run", "--iterations", "50", "--seed", "7", "-e", "0.3",
        ]);
        match cli.command {
            Commands::Run { overrides, exploration_rate, output } => {
                assert_eq!(overrides.iterations, Some(50));
                assert_eq!(overrides.seed, Some(7));
                assert_eq!(exploration_rate, Some(0.3));
                assert!(output.is_none());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_sweep_rates() {
        let cli = Cli::parse_from(["order-tuner", "sweep", "--rates", "0,0.25,1"]);
        match cli.command {
            Commands::Sweep { rates, .. } => assert_eq!(rates, Some(vec![0.0, 0.25, 1.0])),
            _ => panic!("expected sweep command"),
        }
    }

    #[test]
    fn test_overrides_apply() {
        let mut settings = Settings::default();
        ExperimentOverrides { iterations: Some(3), seed: None }.apply(&mut settings);
        assert_eq!(settings.optimizer.iterations, 3);
        assert_eq!(settings.optimizer.seed, 20);
    }
}
