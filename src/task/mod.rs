//! Task lifecycle and access control engine.
//!
//! Implements deployment, the acknowledgement/completion state machine,
//! role-based authorization, dependency gating, the append-only activity
//! audit trail, and post-commit change notifications. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
