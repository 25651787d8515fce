//! Adapter implementations of the capacity ports.

pub mod memory;
pub mod postgres;
