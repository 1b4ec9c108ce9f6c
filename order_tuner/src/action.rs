//! A single perturbation of one order field by a fixed signed step.

use crate::order::{OrderField, PurchaseOrder};
use serde::Serialize;
use std::fmt;

/// One arm of the bandit: nudge `field` of the order at index `order` by `step`.
///
/// The order is referenced by its position in the pool the agent was built
/// from, so many actions can target the same order without owning it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    order: usize,
    field: OrderField,
    step: i32,
    value_estimate: f64,
}

impl Action {
    /// Panics if `step` is zero.
    pub fn new(order: usize, field: OrderField, step: i32) -> Self {
        assert!(step != 0, "action step must be nonzero");
        Self {
            order,
            field,
            step,
            value_estimate: 0.0,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn field(&self) -> OrderField {
        self.field
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    /// Reward observed the last time this action was chosen (0 until then).
    pub fn value_estimate(&self) -> f64 {
        self.value_estimate
    }

    pub(crate) fn set_value_estimate(&mut self, reward: f64) {
        self.value_estimate = reward;
    }

    /// Apply the step to the target field, clamping the result at zero.
    ///
    /// Panics if the action targets an order outside `orders`.
    pub fn apply(&self, orders: &mut [PurchaseOrder]) {
        assert!(
            self.order < orders.len(),
            "action targets order {} but the pool holds {} orders",
            self.order,
            orders.len()
        );
        let target = &mut orders[self.order];
        let current = i64::from(target.get(self.field));
        let next = (current + i64::from(self.step)).max(0);
        target.set(self.field, u32::try_from(next).unwrap_or(u32::MAX));
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Action {} {:+} on order {} (estimate {})>",
            self.field, self.step, self.order, self.value_estimate
        )
    }
}
