//! Exploration-rate sweep: one independent experiment per configured rate.
//!
//! Each experiment gets its own generator seeded from the optimizer seed, so
//! runs are reproducible and can execute in parallel without sharing state.

use crate::{
    optimizer::{OptimizationRun, Optimizer, RunSummary},
    settings::Settings,
    simulation::Objective,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

/// Complete sweep result
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub total_duration_ms: u64,
    pub runs: Vec<RunSummary>,
}

impl SweepReport {
    /// The run with the highest final reward.
    pub fn best_run(&self) -> Option<&RunSummary> {
        self.runs
            .iter()
            .filter(|run| run.final_reward.is_some())
            .max_by(|a, b| {
                a.final_reward
                    .partial_cmp(&b.final_reward)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Run a single experiment with the configured exploration rate.
pub fn run_single<O>(settings: &Settings, objective: &O) -> Result<OptimizationRun>
where
    O: Objective + ?Sized,
{
    let rng = StdRng::seed_from_u64(settings.optimizer.seed);
    Optimizer::new(&settings.optimizer, objective).run(&settings.pool, rng)
}

/// Run one experiment per exploration rate in `settings.sweep`.
///
/// Runs are reported in the order the rates are configured.
#[instrument(skip_all, fields(rates = settings.sweep.exploration_rates.len()))]
pub fn run<O>(settings: &Settings, objective: &O) -> Result<SweepReport>
where
    O: Objective + Sync + ?Sized,
{
    let start_time = Instant::now();
    info!(
        rates = ?settings.sweep.exploration_rates,
        iterations = settings.optimizer.iterations,
        "Starting exploration sweep"
    );

    let runs = settings
        .sweep
        .exploration_rates
        .par_iter()
        .map(|&exploration_rate| {
            let mut experiment = settings.clone();
            experiment.optimizer.exploration_rate = exploration_rate;
            run_single(&experiment, objective)
                .map(|run| run.summary())
                .with_context(|| format!("Sweep run with exploration rate {} failed", exploration_rate))
        })
        .collect::<Result<Vec<_>>>()?;

    let total_duration = start_time.elapsed();
    info!("Sweep completed in {:?}", total_duration);

    Ok(SweepReport {
        generated_at: Utc::now(),
        seed: settings.optimizer.seed,
        total_duration_ms: total_duration.as_millis() as u64,
        runs,
    })
}

/// Print a run summary
pub fn print_run_summary(summary: &RunSummary) {
    println!("\n=== Optimization Summary ===");
    println!("Exploration rate: {}", summary.exploration_rate);
    println!("Iterations: {}", summary.iterations);
    println!("Final reward: {}", format_reward(summary.final_reward));
    println!("Best reward: {}", format_reward(summary.best_reward));
    println!("Mean reward: {}", format_reward(summary.mean_reward));
    println!("Best action: {}", summary.best_action);
    println!("\nFinal orders:");
    for (index, order) in summary.final_orders.iter().enumerate() {
        println!("  {:>3}: {}", index, order);
    }
    println!("============================\n");
}

/// Print sweep summary
pub fn print_sweep_summary(report: &SweepReport) {
    println!("\n=== Exploration Sweep Summary ===");
    println!("Seed: {}", report.seed);
    println!("Duration: {}ms", report.total_duration_ms);
    println!("{:>8} {:>14} {:>14} {:>14}", "epsilon", "final", "best", "mean");
    for run in &report.runs {
        println!(
            "{:>8} {:>14} {:>14} {:>14}",
            run.exploration_rate,
            format_reward(run.final_reward),
            format_reward(run.best_reward),
            format_reward(run.mean_reward),
        );
    }
    if let Some(best) = report.best_run() {
        println!("\nBest exploration rate: {}", best.exploration_rate);
    }
    println!("=================================\n");
}

fn format_reward(reward: Option<f64>) -> String {
    reward.map_or_else(|| "-".to_string(), |r| format!("{:.3}", r))
}

/// Save any serializable report to a JSON file
pub fn save_report<T: Serialize>(report: &T, output_file: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report")?;

    std::fs::write(output_file, json)
        .with_context(|| format!("Failed to write report to: {:?}", output_file))?;

    info!("Report saved to: {:?}", output_file);
    Ok(())
}
