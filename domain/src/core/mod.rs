//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`ids::AgentId`]: identifier of a negotiating party

pub mod error;
pub mod ids;
