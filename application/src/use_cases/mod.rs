//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod load_catalog;
pub mod simulation_controller;
