//! Unit and service tests for the capacity module.
