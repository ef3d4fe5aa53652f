//! HTTP adapter for the simulation engine

mod client;
mod error;

pub use client::HttpSimulationClient;
pub use error::HttpError;
