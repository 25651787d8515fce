//! Resource capacity tracking.
//!
//! This module maintains two representations of a resource's utilization: a
//! mutable *current snapshot* on the resource aggregate and an append-style
//! *weekly history* keyed by `(resource, week start)`. Both derive their load
//! percentage and RAG status from the same pure classifier at write time;
//! read paths never recompute stored derived fields. The module follows
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
