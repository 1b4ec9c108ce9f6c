//! The optimization loop: select, apply, evaluate, reward.

use crate::{
    action::Action,
    agent::Agent,
    order::PurchaseOrder,
    settings::{OptimizerConfig, PoolConfig},
    simulation::Objective,
};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{info, instrument};

/// Build the initial order pool.
///
/// Jitter is drawn from `rng` only for the dimensions that have a nonzero
/// jitter, so a jitter-free pool leaves the generator untouched.
pub fn build_pool<R: Rng>(config: &PoolConfig, rng: &mut R) -> Vec<PurchaseOrder> {
    (0..config.order_count)
        .map(|_| {
            let date = jittered(config.initial_date, config.date_jitter, rng);
            let amount = jittered(config.initial_amount, config.amount_jitter, rng);
            PurchaseOrder::new(date, amount)
        })
        .collect()
}

fn jittered<R: Rng>(center: u32, jitter: u32, rng: &mut R) -> u32 {
    if jitter == 0 {
        return center;
    }
    rng.gen_range(center.saturating_sub(jitter)..=center.saturating_add(jitter))
}

/// Outcome of one experiment: the trained agent and the tuned pool.
pub struct OptimizationRun<R = StdRng> {
    pub agent: Agent<R>,
    pub orders: Vec<PurchaseOrder>,
}

impl<R> OptimizationRun<R> {
    pub fn summary(&self) -> RunSummary {
        let history = self.agent.reward_history();
        let mean_reward = if history.is_empty() {
            None
        } else {
            Some(history.iter().sum::<f64>() / history.len() as f64)
        };

        RunSummary {
            exploration_rate: self.agent.exploration_rate(),
            iterations: history.len(),
            final_reward: history.last().copied(),
            best_reward: history.iter().copied().reduce(f64::max),
            mean_reward,
            best_action: self.agent.best_action().clone(),
            final_orders: self.orders.clone(),
            reward_history: history.to_vec(),
        }
    }
}

/// Serializable digest of an [`OptimizationRun`].
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub exploration_rate: f64,
    pub iterations: usize,
    pub final_reward: Option<f64>,
    pub best_reward: Option<f64>,
    pub mean_reward: Option<f64>,
    pub best_action: Action,
    pub final_orders: Vec<PurchaseOrder>,
    pub reward_history: Vec<f64>,
}

/// Drives an [`Agent`] against an [`Objective`].
pub struct Optimizer<'a, O: ?Sized> {
    config: &'a OptimizerConfig,
    objective: &'a O,
}

impl<'a, O: Objective + ?Sized> Optimizer<'a, O> {
    pub fn new(config: &'a OptimizerConfig, objective: &'a O) -> Self {
        Self { config, objective }
    }

    /// Run one iteration and return the reward fed back to the agent.
    ///
    /// An objective error is returned as is; the perturbation applied before
    /// it stays in `orders` and no reward is recorded.
    pub fn step<R: Rng>(&self, agent: &mut Agent<R>, orders: &mut [PurchaseOrder]) -> Result<f64> {
        let pending = agent.select_action();
        pending.action().apply(orders);

        let error = self.objective.evaluate(orders)?;
        let reward = self.config.reward_baseline - error;
        pending.apply_reward(reward);
        Ok(reward)
    }

    /// Run the configured number of iterations on an existing agent and pool.
    pub fn optimize<R: Rng>(&self, agent: &mut Agent<R>, orders: &mut [PurchaseOrder]) -> Result<()> {
        let interval = self.config.progress_interval;
        for iteration in 1..=self.config.iterations {
            let reward = self.step(agent, orders)?;

            if interval > 0 && iteration % interval == 0 {
                info!(
                    iteration,
                    reward,
                    best_estimate = agent.best_action().value_estimate(),
                    "Optimization progress"
                );
            }
        }
        Ok(())
    }

    /// Build the pool and agent from `rng`, then optimize.
    #[instrument(
        skip_all,
        fields(
            exploration_rate = self.config.exploration_rate,
            iterations = self.config.iterations
        )
    )]
    pub fn run<R: Rng>(&self, pool: &PoolConfig, mut rng: R) -> Result<OptimizationRun<R>> {
        let mut orders = build_pool(pool, &mut rng);
        let mut agent = Agent::new(&orders, self.config.exploration_rate, rng);
        info!(
            orders = orders.len(),
            actions = agent.actions().len(),
            "Starting optimization"
        );

        self.optimize(&mut agent, &mut orders)?;

        info!(
            final_reward = ?agent.reward_history().last(),
            best_action = %agent.best_action(),
            "Optimization finished"
        );
        Ok(OptimizationRun { agent, orders })
    }
}
