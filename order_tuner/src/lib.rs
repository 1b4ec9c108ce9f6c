//! Order Tuner - Core Library
//!
//! Epsilon-greedy multi-armed bandit search over the parameters of a pool of
//! purchase orders.

pub mod action;
pub mod agent;
pub mod cli;
pub mod optimizer;
pub mod order;
pub mod settings;
pub mod simulation;
pub mod sweep;
pub mod telemetry;

pub use action::Action;
pub use agent::{Agent, Pending};
pub use optimizer::{OptimizationRun, Optimizer, RunSummary};
pub use order::{OrderField, PurchaseOrder};
pub use simulation::{InventorySimulation, Objective};
