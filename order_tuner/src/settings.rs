//! Experiment configuration with environment variable support and validation.

use anyhow::{anyhow, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optimization loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub iterations: usize,
    pub exploration_rate: f64,
    pub seed: u64,
    /// Reward is `reward_baseline - objective`.
    pub reward_baseline: f64,
    /// Iterations between progress log lines; 0 disables them.
    pub progress_interval: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            exploration_rate: 0.2,
            seed: 20,
            reward_baseline: 1_000.0,
            progress_interval: 1_000,
        }
    }
}

/// Initial order pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub order_count: usize,
    pub initial_date: u32,
    pub initial_amount: u32,
    /// Half-width of the seeded uniform jitter applied to each initial date.
    pub date_jitter: u32,
    pub amount_jitter: u32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            order_count: 10,
            initial_date: 200,
            initial_amount: 5,
            date_jitter: 0,
            amount_jitter: 0,
        }
    }
}

/// Inventory simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub horizon_days: u32,
    pub initial_stock: f64,
    pub daily_demand: f64,
    pub target_stock: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            initial_stock: 20.0,
            daily_demand: 0.25,
            target_stock: 10.0,
        }
    }
}

/// Exploration-rate sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub exploration_rates: Vec<f64>,
    pub output_file: Option<PathBuf>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            exploration_rates: vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5],
            output_file: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub enable_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            enable_target: false,
        }
    }
}

/// Main settings structure with all configuration sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub optimizer: OptimizerConfig,
    pub pool: PoolConfig,
    pub simulation: SimulationConfig,
    pub sweep: SweepConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from the embedded defaults, an optional file and the environment.
    ///
    /// Environment variables use the `ORDER_TUNER_` prefix and `__` between
    /// section and key, e.g. `ORDER_TUNER_OPTIMIZER__EXPLORATION_RATE=0.3`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            // Start with default settings
            .add_source(File::from_str(
                include_str!("../config.toml"),
                FileFormat::Toml,
            ))
            // Add local config file if it exists
            .add_source(File::with_name("order_tuner").required(false));

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("ORDER_TUNER")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("sweep.exploration_rates")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings for consistency
    pub fn validate(&self) -> Result<()> {
        validate_exploration_rate(self.optimizer.exploration_rate)?;
        if !self.optimizer.reward_baseline.is_finite() {
            return Err(anyhow!("Reward baseline must be finite"));
        }

        if self.pool.order_count == 0 {
            return Err(anyhow!("Order pool must contain at least one order"));
        }

        if self.simulation.horizon_days == 0 {
            return Err(anyhow!("Simulation horizon must span at least one day"));
        }

        if self.sweep.exploration_rates.is_empty() {
            return Err(anyhow!("Sweep needs at least one exploration rate"));
        }
        for rate in &self.sweep.exploration_rates {
            validate_exploration_rate(*rate)?;
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(anyhow!("Unknown log format '{}', expected text or json", other)),
        }
    }

    /// Effective settings rendered as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn validate_exploration_rate(rate: f64) -> Result<()> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(anyhow!("Exploration rate must lie in [0, 1], got {}", rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.optimizer.iterations, 10_000);
        assert_eq!(settings.optimizer.seed, 20);
        assert_eq!(settings.pool.order_count, 10);
        assert_eq!(settings.simulation, SimulationConfig::default());
        assert_eq!(settings.sweep.exploration_rates.len(), 6);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("experiment.toml");
        fs::write(
            &config_path,
            r#"
[optimizer]
iterations = 50
exploration_rate = 0.0

[pool]
order_count = 1
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&config_path)).unwrap();
        assert_eq!(settings.optimizer.iterations, 50);
        assert_eq!(settings.optimizer.exploration_rate, 0.0);
        assert_eq!(settings.pool.order_count, 1);
        assert_eq!(settings.pool.initial_date, 200);
    }

    #[test]
    fn test_invalid_exploration_rate_is_rejected() {
        let mut settings = Settings::default();
        settings.optimizer.exploration_rate = 1.2;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.sweep.exploration_rates.push(-0.1);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_pool_and_horizon_are_rejected() {
        let mut settings = Settings::default();
        settings.pool.order_count = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.simulation.horizon_days = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let mut settings = Settings::default();
        settings.logging.format = "xml".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_toml_rendering() {
        let rendered = Settings::default().to_toml().unwrap();
        assert!(rendered.contains("[optimizer]"));
        assert!(rendered.contains("exploration_rate = 0.2"));
    }
}
