//! Error types for capacity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating capacity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapacityDomainError {
    /// The role is `Other` but no custom role label was supplied.
    #[error("a custom role name is required when the role is 'other'")]
    MissingCustomRole,
}

/// Error returned while parsing RAG statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown RAG status: {0}")]
pub struct ParseRagStatusError(pub String);

/// Error returned while parsing resource roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown resource role: {0}")]
pub struct ParseResourceRoleError(pub String);
