//! Epsilon-greedy agent over a fixed catalogue of order perturbations.

use crate::action::Action;
use crate::order::{OrderField, PurchaseOrder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Signed steps generated for every (order, field) pair, in catalogue order.
pub const STEPS: [i32; 2] = [-1, 1];

/// Stateless bandit agent with a last-observation value estimate per action.
pub struct Agent<R = StdRng> {
    exploration_rate: f64,
    actions: Vec<Action>,
    reward_history: Vec<f64>,
    rng: R,
}

impl Agent<StdRng> {
    /// Convenience constructor backed by a `StdRng` seeded with `seed`.
    pub fn seeded(orders: &[PurchaseOrder], exploration_rate: f64, seed: u64) -> Self {
        Self::new(orders, exploration_rate, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Agent<R> {
    /// Build the catalogue as orders × fields × steps.
    ///
    /// Panics if `orders` is empty or `exploration_rate` is outside `[0, 1]`.
    pub fn new(orders: &[PurchaseOrder], exploration_rate: f64, rng: R) -> Self {
        assert!(!orders.is_empty(), "agent needs at least one order");
        assert!(
            (0.0..=1.0).contains(&exploration_rate),
            "exploration rate must lie in [0, 1], got {exploration_rate}"
        );

        let actions = (0..orders.len())
            .flat_map(|order| {
                OrderField::ALL.into_iter().flat_map(move |field| {
                    STEPS
                        .into_iter()
                        .map(move |step| Action::new(order, field, step))
                })
            })
            .collect();

        Self {
            exploration_rate,
            actions,
            reward_history: Vec::new(),
            rng,
        }
    }

    /// Choose an action using the epsilon-greedy strategy.
    ///
    /// The returned handle must be resolved with [`Pending::apply_reward`];
    /// it holds the agent mutably, so no other selection can start meanwhile.
    pub fn select_action(&mut self) -> Pending<'_, R> {
        let explore = self.rng.gen::<f64>() < self.exploration_rate;
        let index = if explore {
            self.rng.gen_range(0..self.actions.len())
        } else {
            self.greedy_index()
        };

        debug!(
            index,
            explore,
            action = %self.actions[index],
            "Action selected"
        );
        Pending { agent: self, index }
    }
}

impl<R> Agent<R> {
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// One reward per completed iteration, oldest first.
    pub fn reward_history(&self) -> &[f64] {
        &self.reward_history
    }

    pub fn iterations(&self) -> usize {
        self.reward_history.len()
    }

    /// The action greedy selection would pick right now.
    pub fn best_action(&self) -> &Action {
        &self.actions[self.greedy_index()]
    }

    // First maximum in catalogue order wins ties.
    fn greedy_index(&self) -> usize {
        let mut best = 0;
        for (index, action) in self.actions.iter().enumerate().skip(1) {
            if action.value_estimate() > self.actions[best].value_estimate() {
                best = index;
            }
        }
        best
    }
}

/// An action chosen by [`Agent::select_action`] that still awaits its reward.
#[must_use = "a selected action must be rewarded with `apply_reward`"]
pub struct Pending<'a, R> {
    agent: &'a mut Agent<R>,
    index: usize,
}

impl<R> Pending<'_, R> {
    /// Position of the chosen action in the catalogue.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn action(&self) -> &Action {
        &self.agent.actions[self.index]
    }

    /// Record `reward` in the history and make it the chosen action's estimate.
    pub fn apply_reward(self, reward: f64) {
        self.agent.reward_history.push(reward);
        self.agent.actions[self.index].set_value_estimate(reward);
    }
}
