//! BDD step definitions for the homework notifier

pub mod cycle_steps;
pub mod startup_steps;
