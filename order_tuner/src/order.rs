//! Purchase orders and the numeric fields the agent is allowed to tune.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A purchase order with two independently tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Delivery day, counted from the start of the simulated horizon.
    pub date: u32,
    /// Units delivered on `date`.
    pub amount: u32,
}

impl PurchaseOrder {
    pub fn new(date: u32, amount: u32) -> Self {
        Self { date, amount }
    }

    pub fn get(&self, field: OrderField) -> u32 {
        match field {
            OrderField::Date => self.date,
            OrderField::Amount => self.amount,
        }
    }

    pub fn set(&mut self, field: OrderField, value: u32) {
        match field {
            OrderField::Date => self.date = value,
            OrderField::Amount => self.amount = value,
        }
    }
}

impl fmt::Display for PurchaseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PurchaseOrder date={} amount={}>", self.date, self.amount)
    }
}

/// Selector for a tunable field of [`PurchaseOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    /// Timing of the delivery.
    Date,
    /// Quantity delivered.
    Amount,
}

impl OrderField {
    /// Every tunable field, in catalogue order.
    pub const ALL: [OrderField; 2] = [OrderField::Date, OrderField::Amount];

    pub fn name(self) -> &'static str {
        match self {
            OrderField::Date => "date",
            OrderField::Amount => "amount",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_independent() {
        let mut order = PurchaseOrder::new(200, 5);
        order.set(OrderField::Date, 150);
        assert_eq!(order.get(OrderField::Date), 150);
        assert_eq!(order.get(OrderField::Amount), 5);

        order.set(OrderField::Amount, 9);
        assert_eq!(order, PurchaseOrder::new(150, 9));
    }

    #[test]
    fn test_field_order_and_names() {
        assert_eq!(OrderField::ALL, [OrderField::Date, OrderField::Amount]);
        assert_eq!(OrderField::Date.to_string(), "date");
        assert_eq!(
            serde_json::to_string(&OrderField::Amount).unwrap(),
            "\"amount\""
        );
    }
}
