//! Capstan: resource capacity tracking engine.
//!
//! This crate maintains per-resource weekly utilization figures, classifies
//! each resource into a traffic-light (RAG) status from a numeric threshold
//! rule, and assembles multi-resource, multi-week utilization heatmaps and
//! portfolio-level summaries on demand.
//!
//! # Architecture
//!
//! Capstan follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, PostgreSQL)
//!
//! # Modules
//!
//! - [`capacity`]: Resource snapshots, weekly workload history, and
//!   utilization reporting

pub mod capacity;
