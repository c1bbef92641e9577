//! Rewrite orchestrator.
//!
//! Drives a [`Rewriter`] across the groups a [`crate::planner`] run
//! produced, in either of two execution strategies ([`run_all_or_nothing`]
//! or [`run_partial_progress`]), and reports the outcome as a map from
//! [`crate::planner::FileGroupInfo`] to [`crate::planner::FileGroupResult`]
//! containing one entry per group that was actually committed.
//!
//! Submodules:
//! - [`config`]   — `OrchestratorConfig` and its option parsing/validation
//! - [`rewriter`] — the `Rewriter` trait external callers implement
//! - [`state`]    — the `GroupState` lifecycle enum
//! - [`dispatch`] — assigns dispatch order and identifiers to planned groups
//! - [`run`]      — the two execution strategies

pub mod config;
pub mod dispatch;
pub mod rewriter;
pub mod run;
pub mod state;

pub use config::OrchestratorConfig;
pub use dispatch::dispatch_order;
pub use rewriter::Rewriter;
pub use run::{run_all_or_nothing, run_partial_progress, COMMITTER_TIMEOUT};
pub use state::GroupState;
