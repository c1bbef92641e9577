//! Crate-wide error types.
//!
//! Library code never uses `anyhow` internally — each fallible operation
//! returns one of the typed errors below so callers can match on failure
//! kind (configuration / rewrite / commit / timeout). `anyhow` is reserved
//! for the demonstration binary (`src/bin/compactplan.rs`) and for wrapping
//! a rewriter's own opaque failure cause.

use thiserror::Error;

use crate::planner::FileGroupInfo;

/// Errors raised while building or validating a [`crate::planner::PlannerConfig`]
/// or [`crate::orchestrator::OrchestratorConfig`] from their string-keyed
/// option surface. Raised before any planning or rewrite work begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown configuration option: {0}")]
    UnknownOption(String),

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("missing required configuration option: {0}")]
    MissingRequired(String),

    #[error("configuration invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors raised by the rewrite orchestrator.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// A rewrite failed. In all-or-nothing mode this is fatal; in partial
    /// mode it is recovered internally and never reaches the caller.
    #[error("rewrite failed for group {group:?}: {source}")]
    RewriteFailed {
        group: FileGroupInfo,
        #[source]
        source: anyhow::Error,
    },

    /// A commit call failed. In all-or-nothing mode every written group is
    /// aborted and this error is surfaced; in partial mode only the failing
    /// batch is dropped and the run continues.
    #[error("commit failed: {source}")]
    CommitFailed {
        #[source]
        source: anyhow::Error,
    },

    /// The committer did not shut down within the bounded timeout. Always
    /// fatal.
    #[error("committer did not shut down within the timeout")]
    CommitterTimeout,
}

/// Top-level error type aggregating every failure mode this crate can
/// surface to a caller.
#[derive(Debug, Error)]
pub enum CompactError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}

pub type Result<T> = std::result::Result<T, CompactError>;
