//! Objective functions scoring a pool of purchase orders (lower is better).

use crate::order::PurchaseOrder;
use crate::settings::SimulationConfig;
use anyhow::{anyhow, Result};

/// Scalar error of the current pool state.
///
/// Implementations must be pure: the result may depend only on `orders`.
pub trait Objective {
    fn evaluate(&self, orders: &[PurchaseOrder]) -> Result<f64>;
}

impl<F> Objective for F
where
    F: Fn(&[PurchaseOrder]) -> Result<f64>,
{
    fn evaluate(&self, orders: &[PurchaseOrder]) -> Result<f64> {
        self(orders)
    }
}

/// Day-by-day stock simulation scored by its mean squared distance to a target level.
///
/// Stock starts at `initial_stock`, every order dated inside the horizon
/// delivers its amount on that day, and `daily_demand` is consumed each day.
/// Stock may go negative (backlog).
#[derive(Debug, Clone)]
pub struct InventorySimulation {
    config: SimulationConfig,
}

impl InventorySimulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Closing stock level of each simulated day.
    pub fn stock_levels(&self, orders: &[PurchaseOrder]) -> Vec<f64> {
        let horizon = self.config.horizon_days as usize;
        let mut deliveries = vec![0.0; horizon];
        for order in orders {
            if let Some(slot) = deliveries.get_mut(order.date as usize) {
                *slot += f64::from(order.amount);
            }
        }

        let mut stock = self.config.initial_stock;
        deliveries
            .into_iter()
            .map(|delivered| {
                stock += delivered - self.config.daily_demand;
                stock
            })
            .collect()
    }

    pub fn mean_squared_error(&self, orders: &[PurchaseOrder]) -> Result<f64> {
        if self.config.horizon_days == 0 {
            return Err(anyhow!("Simulation horizon must span at least one day"));
        }

        let levels = self.stock_levels(orders);
        let total: f64 = levels
            .iter()
            .map(|level| (level - self.config.target_stock).powi(2))
            .sum();
        Ok(total / levels.len() as f64)
    }
}

impl Objective for InventorySimulation {
    fn evaluate(&self, orders: &[PurchaseOrder]) -> Result<f64> {
        self.mean_squared_error(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulation(horizon_days: u32) -> InventorySimulation {
        InventorySimulation::new(SimulationConfig {
            horizon_days,
            initial_stock: 10.0,
            daily_demand: 1.0,
            target_stock: 5.0,
        })
    }

    #[test]
    fn test_stock_levels_follow_deliveries() {
        let sim = simulation(4);
        let levels = sim.stock_levels(&[PurchaseOrder::new(1, 3), PurchaseOrder::new(9, 50)]);
        // The order dated past the horizon never arrives.
        assert_eq!(levels, vec![9.0, 11.0, 10.0, 9.0]);
    }

    #[test]
    fn test_mean_squared_error() {
        let sim = simulation(2);
        // Levels 9 and 8 against a target of 5.
        let mse = sim.evaluate(&[]).unwrap();
        assert!((mse - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let sim = InventorySimulation::new(SimulationConfig::default());
        let orders = vec![PurchaseOrder::new(200, 5); 10];
        assert_eq!(sim.evaluate(&orders).unwrap(), sim.evaluate(&orders).unwrap());
    }

    #[test]
    fn test_zero_horizon_is_an_error() {
        let err = simulation(0).evaluate(&[PurchaseOrder::new(0, 1)]).unwrap_err();
        assert!(err.to_string().contains("horizon"));
    }

    #[test]
    fn test_closure_objective() {
        let total_amount = |orders: &[PurchaseOrder]| -> Result<f64> {
            Ok(orders.iter().map(|o| f64::from(o.amount)).sum())
        };
        let orders = [PurchaseOrder::new(1, 2), PurchaseOrder::new(3, 4)];
        assert_eq!(total_amount.evaluate(&orders).unwrap(), 6.0);
    }
}
